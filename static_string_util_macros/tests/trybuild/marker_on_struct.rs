//! The marker leaves named and tuple structs usable.

use static_string_util_macros::static_string_util;

#[static_string_util]
struct User {
    name: String,
    email: String,
}

#[static_string_util]
struct Meters(f64);

fn main() {
    let user = User {
        name: "Alice".to_owned(),
        email: "a@b.com".to_owned(),
    };
    let distance = Meters(1.5);
    assert_eq!(user.name, "Alice");
    assert_eq!(user.email, "a@b.com");
    assert!(distance.0 > 1.0);
}
