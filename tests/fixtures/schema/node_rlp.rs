// Code generated by rlpgen. DO NOT EDIT.

impl Node {
    #[doc(hidden)]
    fn rlp_payload_len(&self) -> usize {
        let mut len = 0;
        len += rlpgen::prim::uint_len(u128::from(self.value));
        len += match &self.next {
            Some(_p0) => rlpgen::Encode::encoded_len(&**_p0),
            None => 1,
        };
        len
    }
}

impl rlpgen::Encode for Node {
    fn encoded_len(&self) -> usize {
        rlpgen::header::list_len(self.rlp_payload_len())
    }

    fn write_to<U: rlpgen::Target>(&self, buf: &mut U) -> rlpgen::EncodeResult<()> {
        rlpgen::Header::list(self.rlp_payload_len()).write_to(buf);
        rlpgen::prim::write_uint(buf, u128::from(self.value));
        match &self.next {
            Some(_p1) => {
                rlpgen::Encode::write_to(&**_p1, buf)?;
            }
            None => {
                rlpgen::prim::write_empty(buf, rlpgen::Kind::List);
            }
        }
        Ok(())
    }
}

impl rlpgen::Decode for Node {
    fn parse(p: &mut rlpgen::ByteParser<'_>) -> rlpgen::DecodeResult<Self> {
        p.open_list()?;
        let __rlp_value = p.take_uint::<u8>()?;
        let __rlp_next = if p.take_empty(rlpgen::Kind::List)? {
            None
        } else {
            Some(Box::new(<Node as rlpgen::Decode>::parse(p)?))
        };
        p.close_list()?;
        Ok(Self { value: __rlp_value, next: __rlp_next })
    }
}
