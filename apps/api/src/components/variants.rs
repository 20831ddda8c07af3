//! Fixed style variants of a component.
//!
//! CSS is rewritten by literal substitution of the default primary color and
//! the default border radius. This is not a CSS parser: any other occurrence
//! of `#3B82F6` or `8px` in the stylesheet is rewritten too.

use uuid::Uuid;

use crate::models::component::{Component, ComponentStyle, ComponentVariant};

const BASE_PRIMARY_COLOR: &str = "#3B82F6";
const BASE_BORDER_RADIUS: &str = "8px";

/// (label, primary color, border radius), in output order.
pub const VARIANT_STYLES: [(&str, &str, &str); 4] = [
    ("Danger", "#EF4444", "4px"),
    ("Success", "#10B981", "12px"),
    ("Purple", "#8B5CF6", "0px"),
    ("Warning", "#F59E0B", "20px"),
];

pub fn generate_variants(component: &Component) -> Vec<ComponentVariant> {
    VARIANT_STYLES
        .iter()
        .map(|&(label, primary_color, border_radius)| {
            let style = ComponentStyle {
                primary_color: primary_color.to_string(),
                border_radius: border_radius.to_string(),
                ..ComponentStyle::default()
            };
            ComponentVariant {
                id: Uuid::new_v4(),
                name: format!("{} - {label}", component.name),
                description: format!("{label} variant of {}", component.name),
                html_code: component.html_code.clone(),
                css_code: rewrite_css(&component.css_code, &style),
                style,
            }
        })
        .collect()
}

fn rewrite_css(css: &str, style: &ComponentStyle) -> String {
    css.replace(BASE_PRIMARY_COLOR, &style.primary_color)
        .replace(BASE_BORDER_RADIUS, &style.border_radius)
}
