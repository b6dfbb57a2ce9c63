/// A macro for config structs read from `toml` files. This macro generates a function that
/// can insert toml comments created from doc comments on fields.
///
/// # Attributes
/// - `#[comment_out = true]`: comments out the field.
///
/// # Invariants
/// Required for this macro to work:
///
/// - struct must implement [`Default`] and `serde`
/// - None of the fields can be [`Option`]
/// - None of the fields can be tables, the config is flat
///
/// # Documentation
/// Consider using the following style when adding documentation:
///
/// ```rust,ignore
/// struct Config {
///     /// BRIEF DESCRIPTION.
///     ///
///     /// (optional) LONGER DESCRIPTION.
///     ///
///     /// Type         | (optional) FIELD TYPE
///     /// Valid values | EXPRESSION REPRESENTING VALID VALUES
///     /// Examples     | (optional) A FEW EXAMPLE VALUES
///     field: (),
/// }
/// ```
///
/// Language for types:
///
/// | Rust type    | Wording used in docs |
/// |--------------|----------------------|
/// | bool         | boolean
/// | u{8-64}      | Number
/// | str, String  | String
///
/// # Field documentation length
/// Add newlines when a documentation line crosses ~70 characters, around this long:
///
/// `----------------------------------------------------------------------`
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[comment_out = $comment_out:literal])?
                $(#[doc = $doc:expr])*
                $(##[$field_meta:meta])*
                pub $field:ident: $field_ty:ty,
            )*
        }
    ) => {
        $(#[$meta])*
        pub struct $name {
            $(
                $(#[doc = $doc])*
                $(#[$field_meta])*
                pub $field: $field_ty,
            )*
        }

        impl $name {
            /// Prefix every key in `doc` with the doc comments of its field.
            pub fn write_docs(doc: &mut dyn ::toml_edit::TableLike) {
                $(
                    {
                        let key_str = &stringify!($field);

                        #[allow(unused_mut, clippy::allow_attributes, reason = "only mutated if commented out")]
                        let mut field_prefix = [ $(
                          format!("##{}\n", $doc),
                        )*].concat();

                        $(
                        if $comment_out {
                            field_prefix.push('#');
                        }
                        )?

                        if let Some(mut key) = doc.key_mut(key_str) {
                            key.leaf_decor_mut().set_prefix(field_prefix);
                        }
                    }
                )*
            }
        }
    };
}

pub(crate) use config_struct;
