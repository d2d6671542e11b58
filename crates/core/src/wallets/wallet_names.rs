use rand::seq::SliceRandom;

const ADJECTIVES: &[&str] = &[
    "Amber", "Brave", "Calm", "Clever", "Crimson", "Daring", "Eager", "Gentle", "Golden", "Humble",
    "Jolly", "Lucky", "Mellow", "Nimble", "Quiet", "Rapid", "Silver", "Steady", "Sunny", "Witty",
];

const NOUNS: &[&str] = &[
    "Badger", "Beacon", "Canyon", "Comet", "Falcon", "Harbor", "Heron", "Lantern", "Maple",
    "Meadow", "Otter", "Pebble", "Pine", "Raven", "River", "Summit", "Tiger", "Willow", "Wren",
    "Zephyr",
];

/// Two-word placeholder name for wallets created without one, e.g. "Nimble Otter".
pub fn random_wallet_name() -> String {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("New");
    let noun = NOUNS.choose(&mut rng).copied().unwrap_or("Wallet");
    format!("{} {}", adjective, noun)
}
