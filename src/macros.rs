/// Implement [`Navigable`](crate::Navigable) and [`ToValue`](crate::ToValue)
/// for a struct by listing the fields placeholders may reach.
///
/// Every listed field must implement `ToValue`. An optional `parent` names a
/// field holding an embedded navigable value whose fields are inherited.
/// `accessors` lists argument-free methods returning something convertible
/// into a [`Value`](crate::Value).
///
/// ```rust
/// use text_processor::{navigable, ObjectResolver, Resolver};
///
/// #[derive(Debug)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// impl Server {
///     fn url(&self) -> String {
///         format!("http://{}:{}", self.host, self.port)
///     }
/// }
///
/// navigable!(Server {
///     fields: [host, port],
///     accessors: [url],
/// });
///
/// let server = Server { host: "localhost".into(), port: 8080 };
/// let resolver = ObjectResolver::new(Some(&server));
/// assert_eq!(resolver.resolve("url").as_deref(), Some("http://localhost:8080"));
/// ```
#[macro_export]
macro_rules! navigable {
    (
        $ty:ident {
            fields: [ $($field:ident),* $(,)? ]
            $(, parent: $parent:ident)?
            $(, accessors: [ $($accessor:ident),* $(,)? ])?
            $(,)?
        }
    ) => {
        impl $crate::Navigable for $ty {
            fn field(&self, name: &str) -> ::std::option::Option<$crate::Value<'_>> {
                match name {
                    $(stringify!($field) => ::std::option::Option::Some(
                        $crate::ToValue::to_value(&self.$field),
                    ),)*
                    _ => ::std::option::Option::None,
                }
            }

            $(
                fn parent(&self) -> ::std::option::Option<&dyn $crate::Navigable> {
                    ::std::option::Option::Some(&self.$parent)
                }
            )?

            $(
                fn accessor(&self, name: &str) -> ::std::option::Option<$crate::Value<'_>> {
                    match name {
                        $(stringify!($accessor) => ::std::option::Option::Some(
                            $crate::Value::from(self.$accessor()),
                        ),)*
                        _ => ::std::option::Option::None,
                    }
                }
            )?
        }

        impl $crate::ToValue for $ty {
            fn to_value(&self) -> $crate::Value<'_> {
                $crate::Value::Object(self)
            }
        }
    };
}
