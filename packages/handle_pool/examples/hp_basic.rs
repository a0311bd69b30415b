//! Basic usage of the `handle_pool` crate:
//!
//! * Creating a pool.
//! * Creating objects and holding on to their handles.
//! * Accessing objects via handles.
//! * Destroying objects and observing stale handles.

use handle_pool::{Handle, SlotPool};

#[derive(Debug)]
struct Enemy {
    name: &'static str,
    health: u32,
}

fn main() {
    let mut pool = SlotPool::<Enemy, 3>::new();

    // Creating an object gives you a handle that you can later use to look it up again.
    let goblin = pool.create(Enemy {
        name: "goblin",
        health: 30,
    });
    let troll = pool.create(Enemy {
        name: "troll",
        health: 120,
    });
    let bat = pool.create(Enemy {
        name: "bat",
        health: 5,
    });

    println!("Created {goblin}, {troll} and {bat}");

    // The pool never grows. When it is full, you get the invalid handle back.
    let dragon = pool.create(Enemy {
        name: "dragon",
        health: 900,
    });
    assert_eq!(dragon, Handle::invalid());
    println!("Pool is full, the dragon did not fit: {dragon}");

    // Handles resolve to references for as long as the object exists.
    if let Some(troll) = pool.get_mut(troll) {
        troll.health -= 100;
    }
    println!("Troll after a hit: {:?}", pool.get(troll));

    // Destroying the bat frees its slot and invalidates every copy of its handle.
    pool.destroy(bat);
    println!("Bat after destruction: {:?}", pool.get(bat));

    // The slot is reused under a new generation, so the old bat handle stays dead.
    let dragon = pool.create(Enemy {
        name: "dragon",
        health: 900,
    });
    println!("Dragon took the bat's slot: {dragon} (bat was {bat})");
    assert!(pool.get(bat).is_none());

    for (handle, enemy) in &pool {
        println!("{handle}: {} with {} health", enemy.name, enemy.health);
    }
}
