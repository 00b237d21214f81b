//! Named per-field transforms applied before rendering
//!
//! Deployments that cleanse field values on the way out (casing, phone
//! digit stripping, address redaction) configure an ordered list of named
//! transforms on the exporter instead of patching the render path. Each
//! transform targets one field path and rewrites its value in the document
//! snapshot; transforms run in registration order, before column lookup.

use mongodb::bson::{Bson, Document};
use tracing::debug;

/// A named, single-field value rewrite.
pub struct Transform {
    name: String,
    field: String,
    apply: Box<dyn Fn(Bson) -> Bson + Send + Sync>,
}

impl Transform {
    /// Create a transform from a rewrite function.
    ///
    /// # Arguments
    /// * `name` - Stable name for logging and diagnostics
    /// * `field` - Target field path, possibly dotted
    /// * `apply` - Rewrite applied to the field's current value
    pub fn new<F>(name: impl Into<String>, field: impl Into<String>, apply: F) -> Self
    where
        F: Fn(Bson) -> Bson + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            field: field.into(),
            apply: Box::new(apply),
        }
    }

    /// Uppercase a string field; non-string values pass through unchanged.
    pub fn uppercase(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(format!("uppercase({})", field), field, |value| match value {
            Bson::String(s) => Bson::String(s.to_uppercase()),
            other => other,
        })
    }

    /// Blank out a field, rendering it as an empty cell.
    pub fn clear(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(format!("clear({})", field), field, |_| Bson::Null)
    }

    /// Strip every non-digit character from a string field (phone-number
    /// style normalization); non-string values pass through unchanged.
    pub fn digits_only(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(format!("digits_only({})", field), field, |value| match value {
            Bson::String(s) => Bson::String(s.chars().filter(char::is_ascii_digit).collect()),
            other => other,
        })
    }

    /// Stable transform name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target field path.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Rewrite the target field in place. A document without the target
    /// field is left untouched.
    pub fn apply_to(&self, doc: &mut Document) {
        if let Some(slot) = lookup_path_mut(doc, &self.field) {
            let current = std::mem::replace(slot, Bson::Null);
            *slot = (self.apply)(current);
            debug!("Applied transform {}", self.name);
        }
    }
}

impl std::fmt::Debug for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transform")
            .field("name", &self.name)
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

/// Run every transform against one document snapshot, in order.
pub fn apply_all(transforms: &[Transform], doc: &mut Document) {
    for transform in transforms {
        transform.apply_to(doc);
    }
}

/// Mutable counterpart to [`super::lookup_path`].
fn lookup_path_mut<'a>(doc: &'a mut Document, path: &str) -> Option<&'a mut Bson> {
    let mut current = doc;
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            return current.get_mut(segment);
        }
        current = current.get_mut(segment)?.as_document_mut()?;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_uppercase_transform() {
        let mut doc = doc! { "name": "ann smith", "city": "oslo" };
        Transform::uppercase("name").apply_to(&mut doc);

        assert_eq!(doc.get_str("name").unwrap(), "ANN SMITH");
        // only the target field is touched
        assert_eq!(doc.get_str("city").unwrap(), "oslo");
    }

    #[test]
    fn test_clear_transform() {
        let mut doc = doc! { "address": "1 Main St" };
        Transform::clear("address").apply_to(&mut doc);

        assert_eq!(doc.get("address"), Some(&Bson::Null));
    }

    #[test]
    fn test_digits_only_transform() {
        let mut doc = doc! { "phone": "+47 (555) 123-456" };
        Transform::digits_only("phone").apply_to(&mut doc);

        assert_eq!(doc.get_str("phone").unwrap(), "47555123456");
    }

    #[test]
    fn test_non_string_value_passes_through() {
        let mut doc = doc! { "phone": 5551234 };
        Transform::digits_only("phone").apply_to(&mut doc);

        assert_eq!(doc.get_i32("phone").unwrap(), 5551234);
    }

    #[test]
    fn test_missing_field_is_untouched() {
        let mut doc = doc! { "name": "Ann" };
        Transform::uppercase("nickname").apply_to(&mut doc);

        assert_eq!(doc, doc! { "name": "Ann" });
    }

    #[test]
    fn test_dotted_target() {
        let mut doc = doc! { "contact": { "phone": "555-1234" } };
        Transform::digits_only("contact.phone").apply_to(&mut doc);

        let contact = doc.get_document("contact").unwrap();
        assert_eq!(contact.get_str("phone").unwrap(), "5551234");
    }

    #[test]
    fn test_name_and_field_accessors() {
        let transform = Transform::digits_only("contact.phone");
        assert_eq!(transform.name(), "digits_only(contact.phone)");
        assert_eq!(transform.field(), "contact.phone");

        let custom = Transform::new("redact-ssn", "ssn", |_| Bson::Null);
        assert_eq!(custom.name(), "redact-ssn");
        assert_eq!(custom.field(), "ssn");
    }

    #[test]
    fn test_apply_all_runs_in_order() {
        let mut doc = doc! { "name": "ann" };
        let transforms = vec![
            Transform::uppercase("name"),
            Transform::new("suffix(name)", "name", |value| match value {
                Bson::String(s) => Bson::String(format!("{}!", s)),
                other => other,
            }),
        ];

        apply_all(&transforms, &mut doc);
        assert_eq!(doc.get_str("name").unwrap(), "ANN!");
    }
}
