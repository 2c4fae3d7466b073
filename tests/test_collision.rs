mod support;

use proptest::prelude::*;

use space_shooter::collision::{collide, Collidable, Mask};
use space_shooter::entities::{EnemyColour, EnemyCraft, PlayerCraft};

use support::assets;

#[derive(Debug)]
struct Probe {
    x: i32,
    y: i32,
    mask: Mask,
}

impl Collidable for Probe {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn mask(&self) -> &Mask {
        &self.mask
    }
}

fn probe() -> impl Strategy<Value = Probe> {
    (1u32..8, 1u32..8, -12i32..12, -12i32..12, prop::collection::vec(any::<bool>(), 64)).prop_map(
        |(w, h, x, y, bits)| Probe {
            x,
            y,
            mask: Mask::from_fn(w, h, |px, py| bits[(py * 8 + px) as usize]),
        },
    )
}

proptest! {
    #[test]
    fn collision_is_symmetric(a in probe(), b in probe()) {
        prop_assert_eq!(collide(&a, &b), collide(&b, &a));
    }

    #[test]
    fn empty_masks_never_collide(a in probe(), w in 1u32..8, h in 1u32..8) {
        let empty = Probe { x: a.x, y: a.y, mask: Mask::from_fn(w, h, |_, _| false) };
        prop_assert!(!collide(&a, &empty));
    }
}

#[test]
fn same_spot_hulls_collide() {
    let a = assets();
    let player = PlayerCraft::new(300, 630, &a);
    let enemy = EnemyCraft::new(300, 630, EnemyColour::Blue, &a);
    assert!(collide(&player, &enemy));
    assert!(collide(&enemy, &player));
}

#[test]
fn overlapping_boxes_with_transparent_corners_miss() {
    let a = assets();
    let player = PlayerCraft::new(300, 630, &a);
    // Only the player's bottom-right corner and the enemy's top-left corner
    // share pixels, and both corners are transparent padding.
    let enemy = EnemyCraft::new(395, 725, EnemyColour::Red, &a);
    assert!(!collide(&player, &enemy));
}

#[test]
fn far_apart_entities_miss() {
    let a = assets();
    let player = PlayerCraft::new(300, 630, &a);
    let enemy = EnemyCraft::new(300, -1500, EnemyColour::Green, &a);
    assert!(!collide(&player, &enemy));
    assert!(!collide(&enemy, &player));
}
