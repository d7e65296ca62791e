use ply_doc::PlyDocument;

/// Reads the PLY file given on the command line and prints it as JSON.
fn main() -> ply_doc::PlyResult<()> {
    let path = std::env::args()
        .nth(1)
        .expect("usage: dump_json <file.ply>");
    let doc = PlyDocument::from_path(&path)?;
    println!("{}", serde_json::to_string_pretty(&doc).unwrap());
    Ok(())
}
