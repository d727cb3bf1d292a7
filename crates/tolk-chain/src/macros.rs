//! Per-locale accessor generation.

/// Generate a trait with one accessor method per locale and implement it
/// for [`Translation`](crate::Translation).
///
/// Each method forwards to [`Translation::with`](crate::Translation::with)
/// with the locale name, so `t.no("hei")` is `t.with("no", "hei")`. Tags
/// that are not valid identifiers take an explicit string: `pt_br = "pt-BR"`.
///
/// ```
/// use std::sync::Arc;
/// use tolk_chain::{locale_accessors, Translator};
/// use tolk_core::LocaleSet;
///
/// locale_accessors! {
///     pub trait Nordic { en, no, ro }
/// }
///
/// let locales = Arc::new(LocaleSet::new(["en", "no", "ro"], "en").unwrap());
/// let tr = Translator::new(locales, "no", false).unwrap();
/// let greeting = tr.chain("hello").no("hei").unwrap().ro("salut").unwrap();
/// assert_eq!(greeting, "hei");
/// ```
#[macro_export]
macro_rules! locale_accessors {
    (
        $(#[$meta:meta])*
        $vis:vis trait $name:ident { $( $locale:ident $(= $tag:literal)? ),+ $(,)? }
    ) => {
        $(#[$meta])*
        $vis trait $name {
            $(
                #[doc = concat!("Attach text for `", stringify!($locale), "`.")]
                fn $locale<'a>(
                    &self,
                    text: impl Into<Option<&'a str>>,
                ) -> Result<$crate::Translation, $crate::TolkError>;
            )+
        }

        impl $name for $crate::Translation {
            $(
                fn $locale<'a>(
                    &self,
                    text: impl Into<Option<&'a str>>,
                ) -> Result<$crate::Translation, $crate::TolkError> {
                    self.with($crate::__locale_tag!($locale $(= $tag)?), text)
                }
            )+
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __locale_tag {
    ($locale:ident) => {
        stringify!($locale)
    };
    ($locale:ident = $tag:literal) => {
        $tag
    };
}
