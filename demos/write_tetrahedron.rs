use ply_doc::{Encoding, PlyDocument};

/// Demonstrates writing a PLY file representing a tetrahedron.
///
/// A tetrahedron is a pyramid-like shape, consisting of 4 vertices and 4
/// triangular faces. This example builds the document through the mesh
/// helpers and writes it in ascii and binary little endian form.
fn main() -> ply_doc::PlyResult<()> {
    let mut doc = PlyDocument::new();
    doc.comments.push("Tetrahedron example".to_string());
    doc.add_vertex_positions(&[
        [1.0, 1.0, 1.0],
        [1.0, -1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
    ])?;
    doc.add_face_indices(&[
        vec![0, 1, 2],
        vec![0, 3, 1],
        vec![0, 2, 3],
        vec![1, 3, 2],
    ])?;

    // Ascii first, so the output is printable.
    let mut buf = Vec::new();
    doc.write(&mut buf, Encoding::Ascii)?;
    println!("Written PLY data:\n{}", String::from_utf8(buf).unwrap());

    let mut binary = Vec::new();
    doc.write(&mut binary, Encoding::BinaryLittleEndian)?;
    println!("Binary PLY: {} bytes written", binary.len());

    // Prove the round trip: read the binary bytes back.
    let reread = PlyDocument::read(&mut binary.as_slice())?;
    println!(
        "Read back {} vertices and {} faces",
        reread.vertex_positions()?.len(),
        reread.face_indices()?.len()
    );
    Ok(())
}
