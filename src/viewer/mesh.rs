//! Conversion of tray geometry into renderable meshes

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use dicetray::tray::TriangleMesh;

/// Flat-shaded mesh: every triangle gets its own three vertices and normal.
pub fn flat_mesh(mesh: &TriangleMesh) -> Mesh {
    let vertex_count = mesh.triangle_count() * 3;
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(vertex_count);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(vertex_count);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(vertex_count);

    for triangle in 0..mesh.triangle_count() {
        let normal = mesh.triangle_normal(triangle).to_array();
        let corners = mesh.triangle_vertices(triangle);
        for (vertex, uv) in corners.iter().zip([[0.0, 1.0], [1.0, 1.0], [0.5, 0.0]]) {
            positions.push(vertex.to_array());
            normals.push(normal);
            uvs.push(uv);
        }
    }

    let indices: Vec<u32> = (0..positions.len() as u32).collect();

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(indices))
}
