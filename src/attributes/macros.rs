//! Macro generating typed attribute structs
//!
//! Each declared field is stored as a [`ParamValue`](crate::core::ParamValue)
//! and every assignment goes through a [`TypeRegistry`](crate::types::TypeRegistry)
//! cast for the field's type tag.

/// Declare a struct whose attributes are cast on assignment
///
/// # Example
/// ```rust
/// use attribeauty::attributes;
/// use attribeauty::core::ParamValue;
/// use attribeauty::types::TypeRegistry;
///
/// attributes! {
///     pub struct Account {
///         name: string,
///         age: integer,
///         active: boolean,
///     }
/// }
///
/// let registry = TypeRegistry::default();
/// let account = Account::new(&registry, [("name", "ann"), ("age", "42"), ("active", "FALSE")])
///     .unwrap();
///
/// assert_eq!(account.age(), &ParamValue::Integer(42));
/// assert!(!account.is_truthy("active"));
/// ```
#[macro_export]
macro_rules! attributes {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $field:ident : $tag:ident ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $( $field: $crate::core::ParamValue, )*
        }

        #[allow(dead_code)]
        impl $name {
            /// Declared attributes as `(name, type tag)` pairs
            pub const ATTRIBUTES: &'static [(&'static str, &'static str)] = &[
                $( (stringify!($field), stringify!($tag)) ),*
            ];

            /// Build an instance, casting every given attribute
            pub fn new<K, V, I>(
                registry: &$crate::types::TypeRegistry,
                attributes: I,
            ) -> $crate::core::error::Result<Self>
            where
                I: IntoIterator<Item = (K, V)>,
                K: AsRef<str>,
                V: Into<$crate::core::ParamValue>,
            {
                let mut instance = Self::default();
                instance.assign_attributes(registry, attributes)?;
                Ok(instance)
            }

            /// Cast and assign several attributes, stopping at the first failure
            pub fn assign_attributes<K, V, I>(
                &mut self,
                registry: &$crate::types::TypeRegistry,
                attributes: I,
            ) -> $crate::core::error::Result<()>
            where
                I: IntoIterator<Item = (K, V)>,
                K: AsRef<str>,
                V: Into<$crate::core::ParamValue>,
            {
                for (key, value) in attributes {
                    self.set(registry, key.as_ref(), value)?;
                }
                Ok(())
            }

            /// Cast and assign one attribute
            pub fn set(
                &mut self,
                registry: &$crate::types::TypeRegistry,
                name: &str,
                value: impl Into<$crate::core::ParamValue>,
            ) -> $crate::core::error::Result<()> {
                match name {
                    $(
                        stringify!($field) => {
                            self.$field = registry.cast(&value.into(), stringify!($tag))?;
                            Ok(())
                        }
                    )*
                    _ => Err($crate::core::AttribeautyError::MissingAttribute {
                        name: name.to_string(),
                    }),
                }
            }

            /// Look an attribute up by name
            pub fn get(&self, name: &str) -> Option<&$crate::core::ParamValue> {
                match name {
                    $( stringify!($field) => Some(&self.$field), )*
                    _ => None,
                }
            }

            /// Boolean reading of an attribute, `false` when unset or undeclared
            pub fn is_truthy(&self, name: &str) -> bool {
                self.get(name)
                    .is_some_and($crate::core::ParamValue::is_truthy)
            }

            $(
                pub fn $field(&self) -> &$crate::core::ParamValue {
                    &self.$field
                }
            )*
        }
    };
}
