//! Member models attached to class, struct and interface models.

use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

macro_rules! member_model {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            pub name: String,
            /// Display signature, when the metadata source provides one.
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub signature: Option<String>,
            #[serde(default, skip_serializing_if = "is_false")]
            pub is_static: bool,
        }

        impl $name {
            pub fn new(name: impl Into<String>) -> Self {
                Self {
                    name: name.into(),
                    signature: None,
                    is_static: false,
                }
            }

            pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
                self.signature = Some(signature.into());
                self
            }
        }
    };
}

member_model!(
    /// A public constructor.
    ConstructorModel
);
member_model!(
    /// A public field.
    FieldModel
);
member_model!(
    /// A public property.
    PropertyModel
);
member_model!(
    /// A public method.
    MethodModel
);
