/*!
 * Data Structures
 */

mod inline_string;

pub use inline_string::InlineString;
