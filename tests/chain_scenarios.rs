//! Integration tests for building, linking and re-checking a ledger

use ledgerchain::blockchain::{Block, Blockchain, SharedBlockchain};
use ledgerchain::error::ChainError;
use ledgerchain::transaction::Transaction;

#[test]
fn test_two_round_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = Blockchain::new();
    assert_eq!(chain.len(), 1);

    chain.add_transaction("A", "B", 1.0);
    let previous_hash = chain.last_block().hash();
    chain.create_block(5, previous_hash);

    assert_eq!(chain.len(), 2);
    assert_eq!(chain.pending_len(), 0);
    assert_eq!(chain.blocks()[1].transactions(), &[Transaction::new("A", "B", 1.0)]);

    chain.add_transaction("C", "D", 4.0);
    chain.add_transaction("X", "Y", 2.0);
    let previous_hash = chain.last_block().hash();
    chain.create_block(2, previous_hash);

    assert_eq!(chain.len(), 3);
    assert_eq!(
        chain.blocks()[2].transactions(),
        &[Transaction::new("C", "D", 4.0), Transaction::new("X", "Y", 2.0)]
    );
    assert_eq!(chain.blocks()[2].nonce(), 2);
    assert_eq!(chain.pending_len(), 0);

    chain.validate_chain()?;
    Ok(())
}

#[test]
fn test_forged_link_fails_validation() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = Blockchain::new();
    chain.add_transaction("A", "B", 1.0);
    chain.commit_block(5);
    chain.add_transaction("C", "D", 4.0);
    chain.commit_block(2);

    let mut blocks = chain.blocks().to_vec();
    let original = blocks[1].clone();
    blocks[1] = Block::with_timestamp(
        original.timestamp(),
        original.nonce(),
        [0x11; 32],
        original.transactions().to_vec(),
    );

    let rebuilt = Blockchain::from_parts(blocks, Vec::new())?;
    match rebuilt.validate_chain() {
        Err(ChainError::ChainIntegrity { index, .. }) => assert_eq!(index, 1),
        other => panic!("Expected integrity failure at block 1, got {:?}", other),
    }

    let untouched = Blockchain::from_parts(chain.blocks().to_vec(), Vec::new())?;
    untouched.validate_chain()?;
    Ok(())
}

#[test]
fn test_json_export_round_trips_digests() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = Blockchain::new();
    chain.add_transaction("alice", "bob", 12.5);
    chain.commit_block(1);
    chain.add_transaction("bob", "carol", 14.0 * 0.1 + 0.2);
    chain.add_transaction("carol", "dave", 7.0f64.sqrt());
    chain.add_transaction("dave", "erin", 1.0715660391465826e-75);
    chain.add_transaction("erin", "frank", 1.0 / 3.0);
    chain.commit_block(2);
    chain.add_transaction("frank", "alice", f64::MAX);
    chain.add_transaction("alice", "bob", f64::MIN_POSITIVE / 3.0);
    chain.commit_block(3);

    let rebuilt = Blockchain::import_json(&chain.export_json()?)?;
    for (original, imported) in chain.blocks().iter().zip(rebuilt.blocks()) {
        for (a, b) in original.transactions().iter().zip(imported.transactions()) {
            assert_eq!(a.amount().to_bits(), b.amount().to_bits());
        }
        assert_eq!(original.hash(), imported.hash());
    }
    assert_eq!(rebuilt.len(), chain.len());
    rebuilt.validate_chain()?;

    let imported: Vec<Block> = serde_json::from_str(&serde_json::to_string(chain.blocks())?)?;
    Blockchain::from_parts(imported, Vec::new())?.validate_chain()?;
    Ok(())
}

#[test]
fn test_json_export_rejects_non_finite_amount() {
    for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let mut chain = Blockchain::new();
        chain.add_transaction("A", "B", 1.0);
        chain.commit_block(1);
        chain.add_transaction("C", "D", 2.0);
        chain.add_transaction("E", "F", amount);
        chain.commit_block(2);

        let err = chain.export_json().unwrap_err();
        assert_eq!(
            err,
            ChainError::NonFiniteAmount {
                block: 2,
                transaction: 1
            }
        );
    }
}

#[test]
fn test_json_import_reports_malformed_input() {
    let err = Blockchain::import_json("[{\"timestamp\": 1}]").unwrap_err();
    assert!(matches!(err, ChainError::Serialization(_)));

    let err = Blockchain::import_json("[]").unwrap_err();
    assert_eq!(err, ChainError::EmptyChain);
}

#[test]
fn test_genesis_links_to_empty_block_digest() {
    let a = Blockchain::new();
    let b = Blockchain::new();
    let ga = a.last_block();
    let gb = b.last_block();

    assert_eq!(ga.previous_hash(), &Block::empty().hash());
    assert_eq!(ga.previous_hash(), gb.previous_hash());
    let same_time = Block::with_timestamp(ga.timestamp(), 0, *gb.previous_hash(), Vec::new());
    assert_eq!(same_time.hash(), ga.hash());
}

#[test]
fn test_shared_ledger_commit_is_linked() -> Result<(), Box<dyn std::error::Error>> {
    let shared = SharedBlockchain::new();
    let genesis = shared.last_block();

    shared.add_transaction("A", "B", 1.0);
    let block = shared.commit_block(5);

    assert_eq!(block.previous_hash(), &genesis.hash());
    assert_eq!(shared.len(), 2);
    shared.validate_chain()?;
    assert!(shared.render().contains("chain 1"));
    Ok(())
}
