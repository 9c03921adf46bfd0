// Code generated by rlpgen. DO NOT EDIT.

impl Kitchen {
    #[doc(hidden)]
    fn rlp_payload_len(&self) -> usize {
        let mut len = 0;
        len += rlpgen::prim::uint_len(u128::from(self.p));
        len += rlpgen::prim::uint_len(u128::from(self.p_));
        len += rlpgen::prim::uint_len(u128::from(self.wide));
        len += rlpgen::prim::signed_big_len(&self.delta);
        len += rlpgen::header::list_len(self.pairs.iter().map(|_e0| rlpgen::header::list_len(rlpgen::prim::uint_len(u128::from(_e0.0)) + 1)).sum::<usize>());
        len += rlpgen::header::list_len(self.words.iter().map(|_e1| rlpgen::prim::uint_len(u128::from(*_e1))).sum::<usize>());
        len += rlpgen::header::list_len(self.maybe.iter().map(|_e2| match _e2 {
            Some(_p3) => rlpgen::prim::uint_len(u128::from(*_p3)),
            None => 1,
        }).sum::<usize>());
        len += match &self.label {
            Some(_p4) => rlpgen::prim::str_len(_p4),
            None => 1,
        };
        len
    }
}

impl rlpgen::Encode for Kitchen {
    fn encoded_len(&self) -> usize {
        rlpgen::header::list_len(self.rlp_payload_len())
    }

    fn write_to<U: rlpgen::Target>(&self, buf: &mut U) -> rlpgen::EncodeResult<()> {
        let mut sizes = rlpgen::header::ListSizes::new();
        let mut len = 0;
        len += rlpgen::prim::uint_len(u128::from(self.p));
        len += rlpgen::prim::uint_len(u128::from(self.p_));
        len += rlpgen::prim::uint_len(u128::from(self.wide));
        len += rlpgen::prim::signed_big_len(&self.delta);
        let _s5 = sizes.reserve();
        let mut _n6 = 0;
        for _e7 in &self.pairs {
            let _s8 = sizes.reserve();
            let mut _n9 = 0;
            _n9 += rlpgen::prim::uint_len(u128::from(_e7.0));
            _n9 += 1;
            sizes.fill(_s8, _n9);
            _n6 += rlpgen::header::list_len(_n9);
        }
        sizes.fill(_s5, _n6);
        len += rlpgen::header::list_len(_n6);
        let _s10 = sizes.reserve();
        let mut _n11 = 0;
        for _e12 in &self.words {
            _n11 += rlpgen::prim::uint_len(u128::from(*_e12));
        }
        sizes.fill(_s10, _n11);
        len += rlpgen::header::list_len(_n11);
        let _s13 = sizes.reserve();
        let mut _n14 = 0;
        for _e15 in &self.maybe {
            _n14 += match _e15 {
                Some(_p16) => rlpgen::prim::uint_len(u128::from(*_p16)),
                None => 1,
            };
        }
        sizes.fill(_s13, _n14);
        len += rlpgen::header::list_len(_n14);
        len += match &self.label {
            Some(_p17) => rlpgen::prim::str_len(_p17),
            None => 1,
        };
        rlpgen::Header::list(len).write_to(buf);
        rlpgen::prim::write_uint(buf, u128::from(self.p));
        rlpgen::prim::write_uint(buf, u128::from(self.p_));
        rlpgen::prim::write_uint(buf, u128::from(self.wide));
        rlpgen::prim::write_signed_big(buf, &self.delta)?;
        rlpgen::Header::list(sizes.next_len()).write_to(buf);
        for _e18 in &self.pairs {
            rlpgen::Header::list(sizes.next_len()).write_to(buf);
            rlpgen::prim::write_uint(buf, u128::from(_e18.0));
            rlpgen::prim::write_bool(buf, _e18.1);
        }
        rlpgen::Header::list(sizes.next_len()).write_to(buf);
        for _e19 in &self.words {
            rlpgen::prim::write_uint(buf, u128::from(*_e19));
        }
        rlpgen::Header::list(sizes.next_len()).write_to(buf);
        for _e20 in &self.maybe {
            match _e20 {
                Some(_p21) => {
                    rlpgen::prim::write_uint(buf, u128::from(*_p21));
                }
                None => {
                    rlpgen::prim::write_empty(buf, rlpgen::Kind::String);
                }
            }
        }
        match &self.label {
            Some(_p22) => {
                rlpgen::prim::write_str(buf, _p22);
            }
            None => {
                rlpgen::prim::write_empty(buf, rlpgen::Kind::String);
            }
        }
        Ok(())
    }
}

impl rlpgen::Decode for Kitchen {
    fn parse(p: &mut rlpgen::ByteParser<'_>) -> rlpgen::DecodeResult<Self> {
        p.open_list()?;
        let __rlp_p = p.take_uint::<u8>()?;
        let __rlp_p_ = p.take_uint::<u16>()?;
        let __rlp_wide = p.take_uint::<u128>()?;
        let __rlp_delta = p.take_bigint()?;
        let __rlp_pairs = {
            p.open_list()?;
            let mut _v0 = Vec::new();
            while !p.at_window_end() {
                _v0.push({
                    p.open_list()?;
                    let __rlp_0 = p.take_uint::<u16>()?;
                    let __rlp_1 = p.take_bool()?;
                    p.close_list()?;
                    Pair(__rlp_0, __rlp_1)
                });
            }
            p.close_list()?;
            <[Pair; 2]>::try_from(_v0).map_err(|rest| rlpgen::DecodeError::WrongLength { exact: 2, actual: rest.len() })?
        };
        let __rlp_words = {
            p.open_list()?;
            let mut _v1 = Vec::new();
            while !p.at_window_end() {
                _v1.push(p.take_uint::<u32>()?);
            }
            p.close_list()?;
            <[u32; 3]>::try_from(_v1).map_err(|rest| rlpgen::DecodeError::WrongLength { exact: 3, actual: rest.len() })?
        };
        let __rlp_maybe = {
            p.open_list()?;
            let mut _v2 = Vec::new();
            while !p.at_window_end() {
                _v2.push(if p.take_empty(rlpgen::Kind::String)? {
                    None
                } else {
                    Some(p.take_uint::<u64>()?)
                });
            }
            p.close_list()?;
            _v2
        };
        let __rlp_label = if p.take_empty(rlpgen::Kind::String)? {
            None
        } else {
            Some(p.take_string()?)
        };
        p.close_list()?;
        Ok(Self {
            p: __rlp_p,
            p_: __rlp_p_,
            wide: __rlp_wide,
            delta: __rlp_delta,
            pairs: __rlp_pairs,
            words: __rlp_words,
            maybe: __rlp_maybe,
            label: __rlp_label,
        })
    }
}
