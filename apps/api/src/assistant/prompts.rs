// Prompt templates for the design assistant.
// Placeholders in `{braces}` are filled with `str::replace` before sending.

pub const SUGGESTIONS_PROMPT_TEMPLATE: &str = r#"Generate design suggestions for a {project_type} project named '{project_name}'.{component_focus}

Provide 3-5 specific, actionable suggestions. Return a JSON array where each element has this shape:
[
  {
    "title": "Increase button contrast",
    "description": "The primary button text does not meet WCAG AA contrast.",
    "type": "Accessibility",
    "priority": "High",
    "code": "button { color: #FFFFFF; }",
    "language": "css",
    "tags": ["contrast", "wcag"],
    "metrics": {
      "usabilityScore": 8.0,
      "accessibilityScore": 9.0,
      "performanceScore": 7.0,
      "aestheticsScore": 7.5,
      "estimatedImplementationTime": 15,
      "impactLevel": "High",
      "benefits": ["Readable for low-vision users"],
      "risks": []
    }
  }
]

"type" must be one of: LayoutImprovement, ColorScheme, Typography, Accessibility, Performance, ResponsiveDesign, Animation, Interaction, Content, Branding, UserExperience, CodeOptimization.
"priority" must be one of: Low, Medium, High, Critical.

{json_only}"#;

pub const SUGGESTIONS_COMPONENT_FOCUS: &str = "\n\nFocus on the {component_type} component: {component_name}\nCurrent HTML: {html_code}\nCurrent CSS: {css_code}";

pub const COMPONENT_PROMPT_TEMPLATE: &str = r#"Generate a {component_type} component based on this description: {description}

Style requirements:
- Primary color: {primary_color}
- Secondary color: {secondary_color}
- Background color: {background_color}
- Text color: {text_color}
- Border radius: {border_radius}
- Font family: {font_family}
- Font size: {font_size}
- Spacing: {spacing}

Make it modern, accessible, and responsive. Return a JSON object with this shape:
{
  "name": "Primary Call To Action",
  "htmlCode": "<button class=\"cta\">Get started</button>",
  "cssCode": ".cta { background: #3B82F6; }",
  "jsCode": null,
  "properties": [
    {"name": "label", "type": "string", "defaultValue": "Get started", "isRequired": true, "description": "Button text"}
  ],
  "accessibility": {
    "ariaLabel": "Get started",
    "ariaDescribedBy": "",
    "isKeyboardAccessible": true,
    "hasFocusIndicator": true,
    "colorContrast": "4.5:1",
    "screenReaderText": []
  }
}

{json_only}"#;

pub const OPTIMIZE_CODE_PROMPT_TEMPLATE: &str = r#"Optimize this {language} code for {optimization_type}:

{code}

Provide the optimized code with explanations of the improvements made."#;

pub const COLOR_SCHEME_PROMPT_TEMPLATE: &str = r##"Suggest a color scheme for: {description}

Brand guidelines: {brand_guidelines}

Ensure good contrast ratios and accessibility compliance. Return a JSON object with this shape:
{
  "primaryColor": "#3B82F6",
  "secondaryColor": "#6B7280",
  "backgroundColor": "#FFFFFF",
  "textColor": "#1F2937"
}

{json_only}"##;

pub const ACCESSIBILITY_PROMPT_TEMPLATE: &str = r#"Improve the accessibility of this component:

HTML: {html_code}
CSS: {css_code}

Provide improved HTML with:
- Proper ARIA labels
- Semantic HTML
- Keyboard navigation
- Screen reader support
- Focus indicators
- Color contrast improvements"#;

pub const RESPONSIVE_PROMPT_TEMPLATE: &str = r#"Make this code responsive for {framework}:

{code}

Provide responsive code that works on:
- Mobile (320px+)
- Tablet (768px+)
- Desktop (1024px+)

Use modern responsive techniques like CSS Grid, Flexbox, and media queries."#;

pub const USABILITY_PROMPT_TEMPLATE: &str = r#"Analyze the usability of this component:

HTML: {html_code}
CSS: {css_code}

Rate from 1-10 based on:
- Clarity and intuitiveness
- User interaction patterns
- Visual hierarchy
- Information architecture
- User feedback mechanisms

{score_only}"#;

pub const ACCESSIBILITY_SCORE_PROMPT_TEMPLATE: &str = r#"Analyze the accessibility of this component:

HTML: {html_code}
CSS: {css_code}

Rate from 1-10 based on:
- WCAG 2.1 compliance
- Keyboard navigation
- Screen reader compatibility
- Color contrast
- Focus management
- Semantic HTML usage

{score_only}"#;

pub const PERFORMANCE_PROMPT_TEMPLATE: &str = r#"Analyze the performance of this component:

HTML: {html_code}
CSS: {css_code}
JS: {js_code}

Rate from 1-10 based on:
- CSS efficiency
- JavaScript optimization
- Asset loading
- Rendering performance
- Memory usage

{score_only}"#;

pub const DOCUMENTATION_PROMPT_TEMPLATE: &str = r#"Generate documentation for this component:

Name: {component_name}
Type: {component_type}
HTML: {html_code}
CSS: {css_code}

Provide comprehensive documentation including:
- Usage examples
- Props/parameters
- Accessibility features
- Browser support
- Best practices"#;

pub const IMPROVEMENTS_PROMPT_TEMPLATE: &str = r#"Suggest {improvement_type} improvements for this component:

Name: {component_name}
Type: {component_type}
HTML: {html_code}
CSS: {css_code}

Provide specific, actionable improvement suggestions, one per line."#;

pub const TRANSLATION_PROMPT_TEMPLATE: &str = r#"Translate this design description to {framework} code:

{description}

Provide clean, modern, and accessible code that follows {framework} best practices."#;
