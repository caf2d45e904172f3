//! Encodes a message into 128-bit blocks and runs one key-schedule g step.

use gf_block::{blocks_to_text, g, text_to_blocks, Block, Identity};

fn main() {
    let blocks = text_to_blocks("first block heresecond blockhere", 16).unwrap();
    for block in &blocks {
        println!("{}", block.to_hex_string().unwrap());
    }
    assert_eq!(
        blocks_to_text(&blocks).unwrap(),
        "first block heresecond blockhere"
    );

    let product = Block::from(0x57).modular_multiply(&Block::from(0x13)).unwrap();
    assert_eq!(product.to_hex_string().unwrap(), "FE");

    // Last word of the first block, rotated with an identity substitution.
    let word = blocks[0].segment(4, 3).unwrap();
    let rcon = Block::from_value(32, 0x0100_0000);
    let next = g(&word, &Identity, &rcon).unwrap();
    println!("g({}) = {}", word.to_hex_string().unwrap(), next.to_hex_string().unwrap());

    println!("example succeeded");
}
