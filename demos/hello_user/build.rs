//! Generates `StringUtil` for the marked types of `hello_user`.

fn main() -> Result<(), static_string_util::StringUtilError> {
    static_string_util::build::generate().map(|_report| ())
}
