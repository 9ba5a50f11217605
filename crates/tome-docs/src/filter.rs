//! Boilerplate prop filtering and derived component flags.
//!
//! Components in a design system inherit hundreds of props from DOM and
//! style-system types. Those are documented elsewhere, so a prop is dropped
//! when the interface it was declared in belongs to one of these groups.

/// Element attribute types.
pub const ELEMENT_ATTRIBUTE_PARENTS: &[&str] = &[
    "HTMLAttributes",
    "AllHTMLAttributes",
    "HTMLProps",
    "SVGAttributes",
    "SVGProps",
    "ComponentProps",
    "ComponentPropsWithoutRef",
    "ComponentPropsWithRef",
];

/// DOM event handler types.
pub const DOM_EVENT_PARENTS: &[&str] = &["DOMAttributes", "GlobalEventHandlers"];

/// Accessibility attribute types.
pub const ACCESSIBILITY_PARENTS: &[&str] = &["AriaAttributes", "AriaProps"];

/// Style-system passthrough types.
pub const STYLE_SYSTEM_PARENTS: &[&str] = &[
    "SystemProperties",
    "SystemStyleObject",
    "CssProperties",
    "HtmlStyledProps",
    "StyledProps",
    "PolymorphicProps",
    "JsxStyleProps",
];

/// Reserved identity key.
const IDENTITY_KEY: &str = "key";

/// Style-recipe plumbing.
const RECIPE_PROPS: &[&str] = &["recipe", "slotRecipe"];

/// Props whose presence means a component takes style-system props.
const STYLE_PROP_MARKERS: &[&str] = &["css", "asChild", "unstyled"];

/// Whether `parent` names a boilerplate type whose props are never documented.
///
/// Besides the fixed groups, every `*HTMLAttributes` variant
/// (`ButtonHTMLAttributes`, `InputHTMLAttributes`...) counts as element
/// attributes.
pub fn is_boilerplate_parent(parent: &str) -> bool {
    parent.ends_with("HTMLAttributes")
        || [
            ELEMENT_ATTRIBUTE_PARENTS,
            DOM_EVENT_PARENTS,
            ACCESSIBILITY_PARENTS,
            STYLE_SYSTEM_PARENTS,
        ]
        .iter()
        .any(|group| group.contains(&parent))
}

/// Decide whether a prop survives filtering.
///
/// `parent` is the name of the interface or type alias that declares the prop.
pub fn should_keep_prop(name: &str, parent: &str) -> bool {
    if is_boilerplate_parent(parent) {
        return false;
    }
    if name == IDENTITY_KEY {
        return false;
    }
    !RECIPE_PROPS.contains(&name)
}

/// A component supports style props when nothing survived filtering, or when
/// one of the style markers did.
pub fn supports_style_props<'a>(kept: impl IntoIterator<Item = &'a str>) -> bool {
    let mut any = false;
    for name in kept {
        if STYLE_PROP_MARKERS.contains(&name) {
            return true;
        }
        any = true;
    }
    !any
}
