//! The marker leaves enums and traits usable.

use static_string_util_macros::static_string_util;

#[static_string_util]
enum Level {
    Low,
    High,
}

#[static_string_util]
trait Shape {
    fn area(&self) -> f64;
}

struct Square(f64);

impl Shape for Square {
    fn area(&self) -> f64 {
        self.0 * self.0
    }
}

fn main() {
    assert!(matches!(Level::High, Level::High));
    assert!(!matches!(Level::Low, Level::High));
    assert!((Square(2.0).area() - 4.0).abs() < f64::EPSILON);
}
