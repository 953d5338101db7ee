pub mod needs;
pub mod robot;
pub mod tasks;

pub use robot::{Robot, RobotActivity, RobotMood};
