use std::error::Error;

use qrcoding::{encode, ECLevel};

fn main() -> Result<(), Box<dyn Error>> {
    let text = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let code = encode(&text, ECLevel::M)?;
    println!("{}", code.to_ascii());
    Ok(())
}
