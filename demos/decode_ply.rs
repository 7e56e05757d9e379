//! This demo decodes a PLY file containing splats and prints the initial draw order.
//!
//! Run with:
//!
//! ```sh
//! cargo run --example decode-ply -- "path/to/input.ply"
//! ```

use wgpu_splat_core as gs;

fn main() {
    let model_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/model.ply".to_string());

    println!("Reading splats from {model_path}");

    let store = gs::SplatStore::read_ply_file(&model_path).expect("splats");

    println!("Decoded {} splats", store.len());
    println!("Centroid: {}", store.centroid());

    if let Some(splat) = store.get(0) {
        println!("First splat: {splat:?}");
    }

    let mut viewer = gs::Viewer::default();
    viewer.load(store);

    println!("Eye: {}", viewer.camera().eye());
    println!("Draw index count: {}", viewer.draw_index_count());

    if let Some(scene) = viewer.scene() {
        let order = scene.permutation().iter().take(16).collect::<Vec<_>>();
        println!("Farthest splats first: {order:?}");
    }
}
