//! Append a handful of digests, prove one leaf, verify it statelessly.

use cairn_mmr::{Blake3FieldHasher, MemStore, Mmr, Proof};

fn main() -> Result<(), cairn_mmr::Error> {
    let store = MemStore::default();
    let mut mmr = Mmr::new(&store, Blake3FieldHasher);

    let digests: Vec<[u8; 32]> = (1u8..=10).map(|i| [i; 32]).collect();
    let mut positions = Vec::new();
    for digest in &digests {
        positions.push(mmr.append(*digest)?);
    }

    println!(
        "width {}  size {}  root {}",
        mmr.width(),
        mmr.size(),
        mmr.root()
    );

    let pos = positions[9];
    let proof = mmr.proof(pos)?;
    println!(
        "proof for position {}: {} peaks, {} siblings, {} bytes encoded",
        pos,
        proof.peaks().len(),
        proof.siblings().len(),
        proof.encode_to_vec()?.len()
    );

    // Verification needs no store: ship the encoded proof anywhere.
    let wire = proof.encode_to_vec()?;
    let received = Proof::decode_from_slice(&wire)?;
    let ok = received.verify(&Blake3FieldHasher, pos, digests[9])?;
    println!("leaf at position {} verifies: {}", pos, ok);

    Ok(())
}
