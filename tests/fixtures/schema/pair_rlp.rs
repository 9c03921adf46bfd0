// Code generated by rlpgen. DO NOT EDIT.

impl Pair {
    #[doc(hidden)]
    fn rlp_payload_len(&self) -> usize {
        let mut len = 0;
        len += rlpgen::prim::uint_len(u128::from(self.0));
        len += 1;
        len
    }
}

impl rlpgen::Encode for Pair {
    fn encoded_len(&self) -> usize {
        rlpgen::header::list_len(self.rlp_payload_len())
    }

    fn write_to<U: rlpgen::Target>(&self, buf: &mut U) -> rlpgen::EncodeResult<()> {
        rlpgen::Header::list(self.rlp_payload_len()).write_to(buf);
        rlpgen::prim::write_uint(buf, u128::from(self.0));
        rlpgen::prim::write_bool(buf, self.1);
        Ok(())
    }
}

impl rlpgen::Decode for Pair {
    fn parse(p: &mut rlpgen::ByteParser<'_>) -> rlpgen::DecodeResult<Self> {
        p.open_list()?;
        let __rlp_0 = p.take_uint::<u16>()?;
        let __rlp_1 = p.take_bool()?;
        p.close_list()?;
        Ok(Self(__rlp_0, __rlp_1))
    }
}
