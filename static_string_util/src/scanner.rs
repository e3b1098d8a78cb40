//! Selection of marked declarations.

use crate::config::Marker;
use crate::declaration::Declaration;

/// Returns the declarations carrying `marker`, in discovery order.
#[must_use]
pub fn scan<'a>(declarations: &'a [Declaration], marker: &Marker) -> Vec<&'a Declaration> {
    declarations
        .iter()
        .filter(|declaration| declaration.has_attribute(marker.name()))
        .collect()
}

#[cfg(test)]
mod tests {
    //! Unit tests for marker scanning.

    use super::*;
    use crate::declaration::Package;
    use rstest::rstest;

    #[rstest]
    fn keeps_marked_declarations_in_order() {
        let model = Package::new(["model"]);
        let declarations = vec![
            Declaration::new(model.clone(), "Order").with_attribute("static_string_util"),
            Declaration::new(model.clone(), "Audit").with_attribute("derive"),
            Declaration::new(model.clone(), "User")
                .with_attribute("derive")
                .with_attribute("static_string_util"),
        ];

        let names: Vec<&str> = scan(&declarations, &Marker::default())
            .into_iter()
            .map(|declaration| declaration.simple_name.as_str())
            .collect();
        assert_eq!(names, ["Order", "User"]);
    }

    #[rstest]
    fn respects_custom_marker() {
        let declarations = vec![
            Declaration::new(Package::new(["a"]), "One").with_attribute("static_string_util"),
            Declaration::new(Package::new(["a"]), "Two").with_attribute("to_text"),
        ];
        let found = scan(&declarations, &Marker::new("to_text"));
        assert_eq!(found.len(), 1);
        assert_eq!(found.first().map(|d| d.simple_name.as_str()), Some("Two"));
    }

    #[rstest]
    fn empty_input_yields_nothing() {
        assert!(scan(&[], &Marker::default()).is_empty());
    }
}
