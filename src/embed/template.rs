//! Placeholder substitution for embedded shell assets.
//!
//! Assets carry `__SANDPAD_*__` markers; a vars type declares which
//! markers it fills and `render` substitutes them all in one pass. The
//! type parameter ties each asset to the vars it expects, so the shell
//! page cannot be rendered with the script's vars by accident.

use std::borrow::Cow;
use std::marker::PhantomData;

/// A set of placeholder substitutions for one asset.
pub trait TemplateVars {
    /// Marker/value pairs to substitute, in application order.
    fn substitutions(&self) -> Vec<(&'static str, Cow<'_, str>)>;
}

/// An embedded asset expecting vars of type `V`.
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _vars: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _vars: PhantomData,
        }
    }
}

impl<V: TemplateVars> Template<V> {
    /// Substitute every marker the vars declare.
    pub fn render(&self, vars: &V) -> String {
        let mut out = self.content.to_string();
        for (marker, value) in vars.substitutions() {
            out = out.replace(marker, &value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Greeting<'a> {
        name: &'a str,
    }

    impl TemplateVars for Greeting<'_> {
        fn substitutions(&self) -> Vec<(&'static str, Cow<'_, str>)> {
            vec![("__NAME__", Cow::Borrowed(self.name))]
        }
    }

    #[test]
    fn test_render_substitutes_all_occurrences() {
        let t: Template<Greeting> = Template::new("hi __NAME__, bye __NAME__");
        assert_eq!(t.render(&Greeting { name: "pad" }), "hi pad, bye pad");
    }
}
