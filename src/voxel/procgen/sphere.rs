//! Blocky sphere stamping

use glam::{DVec3, IVec3};

use crate::voxel::block::Block;
use crate::voxel::world::VoxelAccess;

/// Stamp a sphere of `block` with the given diameter around `center`.
///
/// With `d = ceil(diameter)` and `r = d / 2` (integer), every offset
/// `(i, j, k)` in `[0, d)^3` whose distance to `(r, r, r)`, truncated to an
/// integer, is at most `r` becomes block
/// `trunc(offset - r + center)` per axis. Even diameters shift the center
/// by half a block. Blocks whose id is in `protected` are never
/// overwritten.
///
/// Returns the number of blocks written.
pub fn draw_sphere<W: VoxelAccess + ?Sized>(
    world: &mut W,
    center: DVec3,
    diameter: f64,
    block: Block,
    protected: &[u16],
) -> usize {
    let d = diameter.ceil() as i32;
    if d <= 0 {
        return 0;
    }
    let r = d / 2;
    let center = if d % 2 == 0 { center + 0.5 } else { center };

    let mut written = 0;
    for i in 0..d {
        for j in 0..d {
            for k in 0..d {
                let offset = IVec3::new(i, j, k) - r;
                if !within_radius(offset, r) {
                    continue;
                }

                // `as i32` truncates toward zero
                let pos = (offset.as_dvec3() + center).as_ivec3();
                if protected.contains(&world.block_at(pos).id) {
                    continue;
                }
                world.set_block(pos, block);
                written += 1;
            }
        }
    }
    written
}

/// Distance from the center, truncated to an integer, is at most `r`.
///
/// Squared in f64 so large diameters cannot overflow.
fn within_radius(offset: IVec3, r: i32) -> bool {
    offset.as_dvec3().length() as i64 <= r as i64
}
