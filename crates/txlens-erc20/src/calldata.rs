//! ERC-20 call-data decoding (transfer / transferFrom / approve).

use primitive_types::{H160, U256};
use txlens_types::{Address, DecodedCall};

/// 4-byte selector of `transfer(address,uint256)`.
pub const TRANSFER_SELECTOR: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];
/// 4-byte selector of `transferFrom(address,address,uint256)`.
pub const TRANSFER_FROM_SELECTOR: [u8; 4] = [0x23, 0xb8, 0x72, 0xdd];
/// 4-byte selector of `approve(address,uint256)`.
pub const APPROVE_SELECTOR: [u8; 4] = [0x09, 0x5e, 0xa7, 0xb3];

/// Attempts to decode transaction input bytes as one of the known ERC-20
/// calls.
///
/// Arguments are decoded positionally as 32-byte ABI words; an address is
/// the low 20 bytes of its word. `None` means the input is too short, the
/// selector is not in the table, or the arguments are truncated; that is the
/// common case for plain value transfers and non-standard contracts, not an
/// error.
pub fn decode_erc20_call(input: &[u8]) -> Option<DecodedCall> {
    if input.len() < 4 {
        return None;
    }
    let (selector, args) = input.split_at(4);

    if selector == TRANSFER_SELECTOR {
        Some(DecodedCall::Transfer {
            to: address_word(args, 0)?,
            amount: uint_word(args, 1)?,
        })
    } else if selector == TRANSFER_FROM_SELECTOR {
        Some(DecodedCall::TransferFrom {
            from: address_word(args, 0)?,
            to: address_word(args, 1)?,
            amount: uint_word(args, 2)?,
        })
    } else if selector == APPROVE_SELECTOR {
        Some(DecodedCall::Approve {
            spender: address_word(args, 0)?,
            value: uint_word(args, 1)?,
        })
    } else {
        tracing::trace!(
            target: "txlens_erc20::calldata",
            selector = %hex::encode(selector),
            "Unrecognized selector"
        );
        None
    }
}

fn word(args: &[u8], index: usize) -> Option<&[u8]> {
    args.get(index * 32..(index + 1) * 32)
}

fn address_word(args: &[u8], index: usize) -> Option<Address> {
    word(args, index).map(|w| Address::new(H160::from_slice(&w[12..])))
}

fn uint_word(args: &[u8], index: usize) -> Option<U256> {
    word(args, index).map(U256::from_big_endian)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u64) -> Address {
        Address::new(H160::from_low_u64_be(n))
    }

    fn encode(selector: [u8; 4], words: &[[u8; 32]]) -> Vec<u8> {
        let mut input = selector.to_vec();
        for w in words {
            input.extend_from_slice(w);
        }
        input
    }

    fn address_as_word(address: Address) -> [u8; 32] {
        address.into_word().0
    }

    fn uint_as_word(value: u64) -> [u8; 32] {
        U256::from(value).to_big_endian()
    }

    #[test]
    fn test_selector_constants_match_canonical_digests() {
        assert_eq!(hex::encode(TRANSFER_SELECTOR), "a9059cbb");
        assert_eq!(hex::encode(TRANSFER_FROM_SELECTOR), "23b872dd");
        assert_eq!(hex::encode(APPROVE_SELECTOR), "095ea7b3");
    }

    #[test]
    fn test_decode_transfer() {
        let input = encode(
            TRANSFER_SELECTOR,
            &[address_as_word(addr(0x2)), uint_as_word(1000)],
        );
        assert_eq!(
            decode_erc20_call(&input),
            Some(DecodedCall::Transfer {
                to: addr(0x2),
                amount: U256::from(1000u64),
            })
        );
    }

    #[test]
    fn test_decode_transfer_from() {
        let input = encode(
            TRANSFER_FROM_SELECTOR,
            &[
                address_as_word(addr(0x1)),
                address_as_word(addr(0x2)),
                uint_as_word(5000),
            ],
        );
        assert_eq!(
            decode_erc20_call(&input),
            Some(DecodedCall::TransferFrom {
                from: addr(0x1),
                to: addr(0x2),
                amount: U256::from(5000u64),
            })
        );
    }

    #[test]
    fn test_decode_approve() {
        let input = encode(
            APPROVE_SELECTOR,
            &[address_as_word(addr(0xb)), uint_as_word(250)],
        );
        assert_eq!(
            decode_erc20_call(&input),
            Some(DecodedCall::Approve {
                spender: addr(0xb),
                value: U256::from(250u64),
            })
        );
    }

    #[test]
    fn test_unknown_selector_yields_none() {
        let input = encode([0xde, 0xad, 0xbe, 0xef], &[uint_as_word(1)]);
        assert_eq!(decode_erc20_call(&input), None);
    }

    #[test]
    fn test_short_input_yields_none() {
        assert_eq!(decode_erc20_call(&[]), None);
        assert_eq!(decode_erc20_call(&[0xa9, 0x05]), None);
    }

    #[test]
    fn test_truncated_arguments_yield_none() {
        // transfer with only the address word
        let input = encode(TRANSFER_SELECTOR, &[address_as_word(addr(0x2))]);
        assert_eq!(decode_erc20_call(&input), None);

        // transferFrom missing the amount word
        let input = encode(
            TRANSFER_FROM_SELECTOR,
            &[address_as_word(addr(0x1)), address_as_word(addr(0x2))],
        );
        assert_eq!(decode_erc20_call(&input), None);
    }
}
