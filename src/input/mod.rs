/*!
 * Input Validation
 * Parses user-typed arrival, burst, and quantum values
 */

mod validation;

pub use validation::{parse_arrival, parse_burst, parse_quantum, InputError, InputField, InputResult};
