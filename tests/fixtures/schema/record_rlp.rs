// Code generated by rlpgen. DO NOT EDIT.

impl Record {
    #[doc(hidden)]
    fn rlp_payload_len(&self) -> usize {
        let mut len = 0;
        len += rlpgen::prim::uint_len(u128::from(self.nonce));
        len += rlpgen::prim::bytes_len(&self.payload);
        len
    }
}

impl rlpgen::Encode for Record {
    fn encoded_len(&self) -> usize {
        rlpgen::header::list_len(self.rlp_payload_len())
    }

    fn write_to<U: rlpgen::Target>(&self, buf: &mut U) -> rlpgen::EncodeResult<()> {
        rlpgen::Header::list(self.rlp_payload_len()).write_to(buf);
        rlpgen::prim::write_uint(buf, u128::from(self.nonce));
        rlpgen::prim::write_bytes(buf, &self.payload);
        Ok(())
    }
}

impl rlpgen::Decode for Record {
    fn parse(p: &mut rlpgen::ByteParser<'_>) -> rlpgen::DecodeResult<Self> {
        p.open_list()?;
        let __rlp_nonce = p.take_uint::<u64>()?;
        let __rlp_payload = p.take_bytes()?.to_vec();
        p.close_list()?;
        Ok(Self { nonce: __rlp_nonce, payload: __rlp_payload })
    }
}
