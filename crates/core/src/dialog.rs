//! Dialog generation helpers.
//!
//! The bot's announcements are assembled from small pools of phrasings; these
//! helpers pick one at random and supply the robot-noise interjections that
//! follow most messages.

use rand::seq::SliceRandom;

const ROBOT_NOISES: &[&str] = &[
    "Beep.",
    "Beep boop.",
    "Blorp. (Oh. Excuse me.)",
    "Bzzzt!",
    "Whirrrrr...",
    "Boop beep.",
    "Oh no, another screw just fell out of me.",
    "Beep beep beep beeeeep...",
    "Chortle.",
    "Zip!",
    "Buzzzzz...",
    "C-c-*clunk*! (Oh no!)",
    "Arm! STOP. MOVING. (Sorry about that.)",
    "11010001110001010110...",
    "ERROR. ERROR. (Sigh...)",
    "0xE55EB3D66CCCA3.",
    "Ding!",
];

/// Get a random robot noise, italicized the way the bot emotes.
pub fn make_robot_noise() -> String {
    let mut rng = rand::thread_rng();
    let noise = ROBOT_NOISES.choose(&mut rng).copied().unwrap_or("Beep.");
    format!("_{noise}_")
}

/// Choose one phrasing from a pool of fully rendered options.
pub fn choose_phrase(options: Vec<String>) -> String {
    let mut rng = rand::thread_rng();
    options.choose(&mut rng).cloned().unwrap_or_default()
}
