//! Token transfer extraction from event logs (ERC-20 Transfer + wrapped-native
//! Deposit/Withdrawal).

use primitive_types::{H256, U256};
use txlens_types::{Address, EvmLog, TokenTransferLog};

/// keccak256("Transfer(address,address,uint256)")
pub const TRANSFER_TOPIC: H256 = H256([
    0xdd, 0xf2, 0x52, 0xad, 0x1b, 0xe2, 0xc8, 0x9b, 0x69, 0xc2, 0xb0, 0x68, 0xfc, 0x37, 0x8d,
    0xaa, 0x95, 0x2b, 0xa7, 0xf1, 0x63, 0xc4, 0xa1, 0x16, 0x28, 0xf5, 0x5a, 0x4d, 0xf5, 0x23,
    0xb3, 0xef,
]);

/// keccak256("Deposit(address,uint256)"), wrapped-native mint
pub const DEPOSIT_TOPIC: H256 = H256([
    0xe1, 0xff, 0xfc, 0xc4, 0x92, 0x3d, 0x04, 0xb5, 0x59, 0xf4, 0xd2, 0x9a, 0x8b, 0xfc, 0x6c,
    0xda, 0x04, 0xeb, 0x5b, 0x0d, 0x3c, 0x46, 0x07, 0x51, 0xc2, 0x40, 0x2c, 0x5c, 0x5c, 0xc9,
    0x10, 0x9c,
]);

/// keccak256("Withdrawal(address,uint256)"), wrapped-native burn
pub const WITHDRAWAL_TOPIC: H256 = H256([
    0x7f, 0xcf, 0x53, 0x2c, 0x15, 0xf0, 0xa6, 0xdb, 0x0b, 0xd6, 0xd0, 0xe0, 0x38, 0xbe, 0xa7,
    0x1d, 0x30, 0xd8, 0x08, 0xc7, 0xd9, 0x8c, 0xb3, 0xbf, 0x72, 0x68, 0xa9, 0x5b, 0xf5, 0x08,
    0x1b, 0x65,
]);

/// Scans the logs and extracts every recognized token transfer, in original
/// log order.
///
/// Two shapes are recognized:
/// - standard ERC-20 `Transfer(from, to, value)`: from/to indexed in the
///   topics, value in the first 32-byte data word;
/// - wrapped-native `Deposit(dst, wad)` / `Withdrawal(src, wad)`: the
///   wrapping contract is the asset contract and the counterparty on the
///   minting/burning side.
///
/// Unrecognized logs are silently skipped; malformed logs with a recognized
/// signature are skipped with a warning.
pub fn parse_transfer_logs(logs: &[EvmLog]) -> Vec<TokenTransferLog> {
    let mut transfers = Vec::new();
    for log in logs {
        if let Some(transfer) = parse_erc20_transfer(log).or_else(|| parse_wrapped_native(log)) {
            transfers.push(transfer);
        }
    }
    transfers
}

/// Keeps only transfers whose sender or recipient is in the tracked set.
///
/// Used to avoid enriching irrelevant transfers in large multi-hop
/// transactions. Address equality is case-insensitive by construction.
pub fn filter_by_tracked(
    transfers: Vec<TokenTransferLog>,
    tracked: &[Address],
) -> Vec<TokenTransferLog> {
    transfers
        .into_iter()
        .filter(|t| tracked.contains(&t.from) || tracked.contains(&t.to))
        .collect()
}

fn parse_erc20_transfer(log: &EvmLog) -> Option<TokenTransferLog> {
    if log.topics.first() != Some(&TRANSFER_TOPIC) {
        return None;
    }
    if log.topics.len() != 3 || log.data.len() < 32 {
        tracing::warn!(
            target: "txlens_erc20::logs",
            contract = %log.address,
            topics_len = log.topics.len(),
            data_len = log.data.len(),
            "Malformed Transfer event"
        );
        return None;
    }
    Some(TokenTransferLog {
        contract: log.address,
        from: Address::from_word(&log.topics[1]),
        to: Address::from_word(&log.topics[2]),
        amount: U256::from_big_endian(&log.data[..32]),
    })
}

fn parse_wrapped_native(log: &EvmLog) -> Option<TokenTransferLog> {
    let topic = *log.topics.first()?;
    if topic != DEPOSIT_TOPIC && topic != WITHDRAWAL_TOPIC {
        return None;
    }
    if log.topics.len() != 2 || log.data.len() < 32 {
        tracing::warn!(
            target: "txlens_erc20::logs",
            contract = %log.address,
            topics_len = log.topics.len(),
            data_len = log.data.len(),
            "Malformed wrapped-native event"
        );
        return None;
    }

    let counterparty = Address::from_word(&log.topics[1]);
    let amount = U256::from_big_endian(&log.data[..32]);

    // Deposit mints wrapped balance to dst; Withdrawal burns it from src.
    let (from, to) = if topic == DEPOSIT_TOPIC {
        (log.address, counterparty)
    } else {
        (counterparty, log.address)
    };

    Some(TokenTransferLog {
        contract: log.address,
        from,
        to,
        amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u64) -> Address {
        Address::new(primitive_types::H160::from_low_u64_be(n))
    }

    fn amount_word(amount: u64) -> Vec<u8> {
        U256::from(amount).to_big_endian().to_vec()
    }

    fn transfer_log(contract: Address, from: Address, to: Address, amount: u64) -> EvmLog {
        EvmLog {
            address: contract,
            topics: vec![TRANSFER_TOPIC, from.into_word(), to.into_word()],
            data: amount_word(amount),
        }
    }

    #[test]
    fn test_topic_constants_match_canonical_digests() {
        assert_eq!(
            hex::encode(TRANSFER_TOPIC),
            "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
        assert_eq!(
            hex::encode(DEPOSIT_TOPIC),
            "e1fffcc4923d04b559f4d29a8bfc6cda04eb5b0d3c460751c2402c5c5cc9109c"
        );
        assert_eq!(
            hex::encode(WITHDRAWAL_TOPIC),
            "7fcf532c15f0a6db0bd6d0e038bea71d30d808c7d98cb3bf7268a95bf5081b65"
        );
    }

    #[test]
    fn test_parse_transfer() {
        let transfers = parse_transfer_logs(&[transfer_log(addr(0x123), addr(1), addr(2), 1000)]);
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].contract, addr(0x123));
        assert_eq!(transfers[0].from, addr(1));
        assert_eq!(transfers[0].to, addr(2));
        assert_eq!(transfers[0].amount, U256::from(1000u64));
    }

    #[test]
    fn test_parse_deposit() {
        let weth = addr(0xaaa);
        let log = EvmLog {
            address: weth,
            topics: vec![DEPOSIT_TOPIC, addr(7).into_word()],
            data: amount_word(5000),
        };
        let transfers = parse_transfer_logs(&[log]);
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].contract, weth);
        assert_eq!(transfers[0].from, weth);
        assert_eq!(transfers[0].to, addr(7));
        assert_eq!(transfers[0].amount, U256::from(5000u64));
    }

    #[test]
    fn test_parse_withdrawal() {
        let weth = addr(0xaaa);
        let log = EvmLog {
            address: weth,
            topics: vec![WITHDRAWAL_TOPIC, addr(7).into_word()],
            data: amount_word(2500),
        };
        let transfers = parse_transfer_logs(&[log]);
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].from, addr(7));
        assert_eq!(transfers[0].to, weth);
    }

    #[test]
    fn test_unrecognized_logs_are_skipped() {
        let unrelated = EvmLog {
            address: addr(0x999),
            topics: vec![H256::repeat_byte(0xde)],
            data: Vec::new(),
        };
        assert!(parse_transfer_logs(&[unrelated]).is_empty());
    }

    #[test]
    fn test_malformed_transfer_is_skipped() {
        // Recognized signature but only two topics
        let log = EvmLog {
            address: addr(0x123),
            topics: vec![TRANSFER_TOPIC, addr(1).into_word()],
            data: amount_word(1000),
        };
        assert!(parse_transfer_logs(&[log]).is_empty());

        // Three topics but truncated data
        let log = EvmLog {
            address: addr(0x123),
            topics: vec![TRANSFER_TOPIC, addr(1).into_word(), addr(2).into_word()],
            data: vec![0u8; 16],
        };
        assert!(parse_transfer_logs(&[log]).is_empty());
    }

    #[test]
    fn test_order_is_preserved_across_shapes() {
        let weth = addr(0xaaa);
        let logs = vec![
            transfer_log(addr(0x123), addr(1), addr(2), 10),
            EvmLog {
                address: weth,
                topics: vec![DEPOSIT_TOPIC, addr(1).into_word()],
                data: amount_word(20),
            },
            transfer_log(addr(0x456), addr(2), addr(3), 30),
        ];
        let transfers = parse_transfer_logs(&logs);
        assert_eq!(transfers.len(), 3);
        assert_eq!(transfers[0].amount, U256::from(10u64));
        assert_eq!(transfers[1].amount, U256::from(20u64));
        assert_eq!(transfers[2].amount, U256::from(30u64));
    }

    #[test]
    fn test_filter_by_tracked() {
        let transfers = vec![
            TokenTransferLog {
                contract: addr(0x123),
                from: addr(1),
                to: addr(2),
                amount: U256::from(10u64),
            },
            TokenTransferLog {
                contract: addr(0x123),
                from: addr(3),
                to: addr(4),
                amount: U256::from(20u64),
            },
            TokenTransferLog {
                contract: addr(0x123),
                from: addr(5),
                to: addr(1),
                amount: U256::from(30u64),
            },
        ];
        let kept = filter_by_tracked(transfers, &[addr(1)]);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].amount, U256::from(10u64));
        assert_eq!(kept[1].amount, U256::from(30u64));
    }

    #[test]
    fn test_filter_matches_mixed_case_forms() {
        let tracked: Address = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"
            .parse()
            .unwrap();
        let sender: Address = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
            .parse()
            .unwrap();
        let transfers = vec![TokenTransferLog {
            contract: addr(0x123),
            from: sender,
            to: addr(2),
            amount: U256::from(1u64),
        }];
        assert_eq!(filter_by_tracked(transfers, &[tracked]).len(), 1);
    }
}
