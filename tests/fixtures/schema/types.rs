// Schema of the records used by the generated-code tests.
//
// The generated implementations next to this file are checked against the
// generator's output by `tests/generated.rs`; regenerate them with
//
//     rlpgen --dir tests/fixtures/schema --type Record --decoder --out tests/fixtures/schema/record_rlp.rs
//     rlpgen --dir tests/fixtures/schema --type Transaction --decoder --out tests/fixtures/schema/transaction_rlp.rs
//     rlpgen --dir tests/fixtures/schema --type Pair --decoder --out tests/fixtures/schema/pair_rlp.rs
//     rlpgen --dir tests/fixtures/schema --type Node --decoder --out tests/fixtures/schema/node_rlp.rs
//     rlpgen --dir tests/fixtures/schema --type Kitchen --decoder --out tests/fixtures/schema/kitchen_rlp.rs

use num_bigint::{BigInt, BigUint};

pub type Address = [u8; 20];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    pub nonce: u64,
    pub payload: Vec<u8>,
}

/// 32-byte hash with a hand-written encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hash(pub [u8; 32]);

impl rlpgen::Encode for Hash {
    fn encoded_len(&self) -> usize {
        rlpgen::prim::bytes_len(&self.0)
    }

    fn write_to<U: rlpgen::Target>(&self, buf: &mut U) -> rlpgen::EncodeResult<()> {
        rlpgen::prim::write_bytes(buf, &self.0);
        Ok(())
    }
}

impl rlpgen::Decode for Hash {
    fn parse(p: &mut rlpgen::ByteParser<'_>) -> rlpgen::DecodeResult<Self> {
        p.take_array().map(Hash)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessTuple {
    pub address: Address,
    pub storage_keys: Vec<Hash>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    pub v: u64,
    pub r: BigUint,
    pub s: BigUint,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub gas_price: BigUint,
    pub gas: u64,
    pub to: Address,
    pub value: BigUint,
    pub data: Vec<u8>,
    pub access_list: Vec<AccessTuple>,
    pub memo: String,
    pub replayable: bool,
    #[cfg_attr(rlpgen, rlp(skip))]
    pub cached_hash: Option<Hash>,
    pub signature: Option<Box<Signature>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pair(pub u16, pub bool);

/// Singly linked list, recursing through the root
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Node {
    pub value: u8,
    pub next: Option<Box<Node>>,
}

/// One field of most remaining shapes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Kitchen {
    pub p: u8,
    pub p_: u16,
    pub wide: u128,
    pub delta: BigInt,
    pub pairs: [Pair; 2],
    pub words: [u32; 3],
    pub maybe: Vec<Option<u64>>,
    pub label: Option<String>,
}
