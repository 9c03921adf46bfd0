// Code generated by rlpgen. DO NOT EDIT.

impl Transaction {
    #[doc(hidden)]
    fn rlp_payload_len(&self) -> usize {
        let mut len = 0;
        len += rlpgen::prim::uint_len(u128::from(self.chain_id));
        len += rlpgen::prim::uint_len(u128::from(self.nonce));
        len += rlpgen::prim::big_len(&self.gas_price);
        len += rlpgen::prim::uint_len(u128::from(self.gas));
        len += rlpgen::prim::bytes_len(&self.to);
        len += rlpgen::prim::big_len(&self.value);
        len += rlpgen::prim::bytes_len(&self.data);
        len += rlpgen::header::list_len(self.access_list.iter().map(|_e0| rlpgen::header::list_len(rlpgen::prim::bytes_len(&_e0.address) + rlpgen::header::list_len(_e0.storage_keys.iter().map(|_e1| rlpgen::Encode::encoded_len(_e1)).sum::<usize>()))).sum::<usize>());
        len += rlpgen::prim::str_len(&self.memo);
        len += 1;
        len += match &self.signature {
            Some(_p2) => rlpgen::header::list_len(rlpgen::prim::uint_len(u128::from((**_p2).v)) + rlpgen::prim::big_len(&(**_p2).r) + rlpgen::prim::big_len(&(**_p2).s)),
            None => 1,
        };
        len
    }
}

impl rlpgen::Encode for Transaction {
    fn encoded_len(&self) -> usize {
        rlpgen::header::list_len(self.rlp_payload_len())
    }

    fn write_to<U: rlpgen::Target>(&self, buf: &mut U) -> rlpgen::EncodeResult<()> {
        let mut sizes = rlpgen::header::ListSizes::new();
        let mut len = 0;
        len += rlpgen::prim::uint_len(u128::from(self.chain_id));
        len += rlpgen::prim::uint_len(u128::from(self.nonce));
        len += rlpgen::prim::big_len(&self.gas_price);
        len += rlpgen::prim::uint_len(u128::from(self.gas));
        len += rlpgen::prim::bytes_len(&self.to);
        len += rlpgen::prim::big_len(&self.value);
        len += rlpgen::prim::bytes_len(&self.data);
        let _s3 = sizes.reserve();
        let mut _n4 = 0;
        for _e5 in &self.access_list {
            let _s6 = sizes.reserve();
            let mut _n7 = 0;
            _n7 += rlpgen::prim::bytes_len(&_e5.address);
            let _s8 = sizes.reserve();
            let mut _n9 = 0;
            for _e10 in &_e5.storage_keys {
                _n9 += rlpgen::Encode::encoded_len(_e10);
            }
            sizes.fill(_s8, _n9);
            _n7 += rlpgen::header::list_len(_n9);
            sizes.fill(_s6, _n7);
            _n4 += rlpgen::header::list_len(_n7);
        }
        sizes.fill(_s3, _n4);
        len += rlpgen::header::list_len(_n4);
        len += rlpgen::prim::str_len(&self.memo);
        len += 1;
        match &self.signature {
            Some(_p11) => {
                let _s12 = sizes.reserve();
                let mut _n13 = 0;
                _n13 += rlpgen::prim::uint_len(u128::from((**_p11).v));
                _n13 += rlpgen::prim::big_len(&(**_p11).r);
                _n13 += rlpgen::prim::big_len(&(**_p11).s);
                sizes.fill(_s12, _n13);
                len += rlpgen::header::list_len(_n13);
            }
            None => len += 1,
        }
        rlpgen::Header::list(len).write_to(buf);
        rlpgen::prim::write_uint(buf, u128::from(self.chain_id));
        rlpgen::prim::write_uint(buf, u128::from(self.nonce));
        rlpgen::prim::write_big(buf, &self.gas_price);
        rlpgen::prim::write_uint(buf, u128::from(self.gas));
        rlpgen::prim::write_bytes(buf, &self.to);
        rlpgen::prim::write_big(buf, &self.value);
        rlpgen::prim::write_bytes(buf, &self.data);
        rlpgen::Header::list(sizes.next_len()).write_to(buf);
        for _e14 in &self.access_list {
            rlpgen::Header::list(sizes.next_len()).write_to(buf);
            rlpgen::prim::write_bytes(buf, &_e14.address);
            rlpgen::Header::list(sizes.next_len()).write_to(buf);
            for _e15 in &_e14.storage_keys {
                rlpgen::Encode::write_to(_e15, buf)?;
            }
        }
        rlpgen::prim::write_str(buf, &self.memo);
        rlpgen::prim::write_bool(buf, self.replayable);
        match &self.signature {
            Some(_p16) => {
                rlpgen::Header::list(sizes.next_len()).write_to(buf);
                rlpgen::prim::write_uint(buf, u128::from((**_p16).v));
                rlpgen::prim::write_big(buf, &(**_p16).r);
                rlpgen::prim::write_big(buf, &(**_p16).s);
            }
            None => {
                rlpgen::prim::write_empty(buf, rlpgen::Kind::List);
            }
        }
        Ok(())
    }
}

impl rlpgen::Decode for Transaction {
    fn parse(p: &mut rlpgen::ByteParser<'_>) -> rlpgen::DecodeResult<Self> {
        p.open_list()?;
        let __rlp_chain_id = p.take_uint::<u64>()?;
        let __rlp_nonce = p.take_uint::<u64>()?;
        let __rlp_gas_price = p.take_biguint()?;
        let __rlp_gas = p.take_uint::<u64>()?;
        let __rlp_to = p.take_array::<20>()?;
        let __rlp_value = p.take_biguint()?;
        let __rlp_data = p.take_bytes()?.to_vec();
        let __rlp_access_list = {
            p.open_list()?;
            let mut _v0 = Vec::new();
            while !p.at_window_end() {
                _v0.push({
                    p.open_list()?;
                    let __rlp_address = p.take_array::<20>()?;
                    let __rlp_storage_keys = {
                        p.open_list()?;
                        let mut _v1 = Vec::new();
                        while !p.at_window_end() {
                            _v1.push(<Hash as rlpgen::Decode>::parse(p)?);
                        }
                        p.close_list()?;
                        _v1
                    };
                    p.close_list()?;
                    AccessTuple { address: __rlp_address, storage_keys: __rlp_storage_keys }
                });
            }
            p.close_list()?;
            _v0
        };
        let __rlp_memo = p.take_string()?;
        let __rlp_replayable = p.take_bool()?;
        let __rlp_signature = if p.take_empty(rlpgen::Kind::List)? {
            None
        } else {
            Some(Box::new({
                p.open_list()?;
                let __rlp_v = p.take_uint::<u64>()?;
                let __rlp_r = p.take_biguint()?;
                let __rlp_s = p.take_biguint()?;
                p.close_list()?;
                Signature { v: __rlp_v, r: __rlp_r, s: __rlp_s }
            }))
        };
        p.close_list()?;
        Ok(Self {
            chain_id: __rlp_chain_id,
            nonce: __rlp_nonce,
            gas_price: __rlp_gas_price,
            gas: __rlp_gas,
            to: __rlp_to,
            value: __rlp_value,
            data: __rlp_data,
            access_list: __rlp_access_list,
            memo: __rlp_memo,
            replayable: __rlp_replayable,
            cached_hash: Default::default(),
            signature: __rlp_signature,
        })
    }
}
