/*!
 * Core Data Structures
 * Small specialized containers used across the simulator
 */

mod inline_string;

pub use inline_string::InlineString;
