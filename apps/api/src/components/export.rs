//! Renders a stored component into a framework shell.

use crate::models::component::Component;

/// Supported export targets. Anything unrecognized renders as plain HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    React,
    Vue,
    Angular,
    Html,
}

impl ExportFormat {
    /// Case-insensitive; never fails.
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "react" => Self::React,
            "vue" => Self::Vue,
            "angular" => Self::Angular,
            _ => Self::Html,
        }
    }
}

/// Component name with spaces and hyphens removed. No other sanitizing.
pub fn identifier(name: &str) -> String {
    name.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

pub fn export_component(component: &Component, format: &str) -> String {
    match ExportFormat::from_label(format) {
        ExportFormat::React => to_react(component),
        ExportFormat::Vue => to_vue(component),
        ExportFormat::Angular => to_angular(component),
        ExportFormat::Html => to_html(component),
    }
}

fn to_react(component: &Component) -> String {
    let name = identifier(&component.name);
    format!(
        "import React from 'react';
import './{name}.css';

interface {name}Props {{
  // Add your props here
}}

export const {name}: React.FC<{name}Props> = ({{ }}) => {{
  return (
    {html}
  );
}};",
        html = component.html_code,
    )
}

fn to_vue(component: &Component) -> String {
    let name = identifier(&component.name);
    format!(
        "<template>
  {html}
</template>

<script lang=\"ts\">
export default {{
  name: '{name}',
  props: {{
    // Add your props here
  }}
}}
</script>

<style scoped>
{css}
</style>",
        html = component.html_code,
        css = component.css_code,
    )
}

fn to_angular(component: &Component) -> String {
    let name = identifier(&component.name);
    format!(
        "import {{ Component }} from '@angular/core';

@Component({{
  selector: 'app-{selector}',
  template: `
    {html}
  `,
  styles: [`
    {css}
  `]
}})
export class {name}Component {{
  // Add your component logic here
}}",
        selector = name.to_lowercase(),
        html = component.html_code,
        css = component.css_code,
    )
}

fn to_html(component: &Component) -> String {
    format!(
        "<!DOCTYPE html>
<html>
<head>
  <style>
    {css}
  </style>
</head>
<body>
  {html}
</body>
</html>",
        css = component.css_code,
        html = component.html_code,
    )
}
