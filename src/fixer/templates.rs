// src/fixer/templates.rs
// =============================================================================
// This module renders the placeholder documents the remediators write.
//
// All stub variants share one structure (heading, intro, body sections,
// footer) described by a TemplateSpec and rendered by one function. The
// variants differ only in their section content, keyed by StubKind.
//
// Generated documents may not introduce new broken links, or the
// validation re-scan would never reach zero: internal links are same-page
// anchors, everything else is plain placeholder text.
// =============================================================================

// The flavor of stub to generate for a missing link target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubKind {
    HowTo,
    Reference,
    Explanation,
    Tutorial,
    Generic,
}

// Section markers matched against the raw link target, in match order.
const SECTION_MARKERS: [(&str, StubKind); 4] = [
    ("how-to-guides/", StubKind::HowTo),
    ("reference/", StubKind::Reference),
    ("explanation/", StubKind::Explanation),
    ("tutorials/", StubKind::Tutorial),
];

impl StubKind {
    /// Picks the template flavor for a raw link target by substring match;
    /// anything outside the known sections gets the generic template.
    pub fn for_target(url: &str) -> StubKind {
        for (marker, kind) in SECTION_MARKERS {
            if url.contains(marker) {
                return kind;
            }
        }
        StubKind::Generic
    }
}

// One stub document, fully described: the renderer below is the only
// place that knows how the pieces are glued together.
struct TemplateSpec {
    heading: String,
    intro: String,
    sections: Vec<(String, String)>,
    footer: String,
}

fn render(spec: &TemplateSpec) -> String {
    let mut out = String::new();
    out.push_str(&spec.heading);
    out.push_str("\n\n");
    out.push_str(&spec.intro);
    out.push('\n');
    for (title, body) in &spec.sections {
        out.push_str("\n---\n\n## ");
        out.push_str(title);
        out.push_str("\n\n");
        out.push_str(body);
        out.push('\n');
    }
    out.push_str("\n---\n\n");
    out.push_str(&spec.footer);
    out.push('\n');
    out
}

/// Derives a human-readable title from a filename stem:
/// hyphens and underscores become spaces, words are title-cased.
pub fn title_from_stem(stem: &str) -> String {
    stem.replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Renders the stub document for a missing link target.
/// Parameterized only by the filename stem (the title derives from it).
pub fn render_stub(kind: StubKind, stem: &str) -> String {
    let title = title_from_stem(stem);
    let lower = title.to_lowercase();

    let spec = match kind {
        StubKind::HowTo => TemplateSpec {
            heading: format!("# How-To: {title}"),
            intro: format!(
                "**Step-by-step guide for {lower}.**\n\n\
                 **When to use this guide**: [Describe when to follow this guide]"
            ),
            sections: vec![
                (
                    "Quick Start".to_string(),
                    "### Prerequisites\n\n\
                     - A working installation of the project\n\
                     - [Additional prerequisites]\n\n\
                     ### Basic Usage\n\n\
                     ```bash\n\
                     # Basic command example\n\
                     ```"
                    .to_string(),
                ),
                (
                    "Step-by-Step Process".to_string(),
                    "### Step 1: [First Step]\n\n\
                     [Detailed instructions for the first step]\n\n\
                     ### Step 2: [Second Step]\n\n\
                     [Detailed instructions for the second step]\n\n\
                     ### Step 3: [Third Step]\n\n\
                     [Detailed instructions for the third step]"
                        .to_string(),
                ),
                (
                    "Troubleshooting".to_string(),
                    "### Common Issues\n\n\
                     - **Issue 1**: [Description and solution]\n\
                     - **Issue 2**: [Description and solution]"
                        .to_string(),
                ),
                (
                    "Related Documentation".to_string(),
                    "- **[Quick Start](#quick-start)** - The short version of this guide\n\
                     - [Add links to related guides here]"
                        .to_string(),
                ),
            ],
            footer: format!(
                "**Need help with {lower}?** File an issue describing where you got stuck."
            ),
        },
        StubKind::Reference => TemplateSpec {
            heading: format!("# {title} Reference"),
            intro: format!("**Complete reference documentation for {lower}.**"),
            sections: vec![
                (
                    "Quick Reference".to_string(),
                    "| Item | Description | Usage |\n\
                     |------|-------------|-------|\n\
                     | [Item 1] | [Description] | [Usage example] |\n\
                     | [Item 2] | [Description] | [Usage example] |"
                        .to_string(),
                ),
                (
                    "Detailed Reference".to_string(),
                    "### [Section 1]\n\n\
                     [Detailed reference information]\n\n\
                     #### Parameters\n\n\
                     - `parameter1`: [Description]\n\
                     - `parameter2`: [Description]"
                        .to_string(),
                ),
                (
                    "Configuration Options".to_string(),
                    format!(
                        "```yaml\n\
                         # {stem}.yaml\n\
                         configuration:\n  \
                         option1: value1\n  \
                         option2: value2\n\
                         ```"
                    ),
                ),
                (
                    "Related Documentation".to_string(),
                    "- **[Quick Reference](#quick-reference)** - The condensed table above\n\
                     - [Add links to related reference pages here]"
                        .to_string(),
                ),
            ],
            footer: format!(
                "**Need help with {lower}?** File an issue with what you were looking for."
            ),
        },
        StubKind::Explanation => TemplateSpec {
            heading: format!("# {title}"),
            intro: format!("**Understanding {lower} and the design decisions behind it.**"),
            sections: vec![
                (
                    "Overview".to_string(),
                    "[High-level explanation of the concept]\n\n\
                     ### Key Concepts\n\n\
                     - **Concept 1**: [Explanation]\n\
                     - **Concept 2**: [Explanation]\n\
                     - **Concept 3**: [Explanation]"
                        .to_string(),
                ),
                (
                    "How It Works".to_string(),
                    "### [Process 1]\n\n\
                     [Step-by-step explanation of how it works]\n\n\
                     ### [Process 2]\n\n\
                     [Another process explanation]"
                        .to_string(),
                ),
                (
                    "Design Decisions".to_string(),
                    "**Problem**: [What problem this solves]\n\
                     **Solution**: [How it is solved]\n\
                     **Trade-offs**: [What trade-offs were made]"
                        .to_string(),
                ),
                (
                    "Further Reading".to_string(),
                    "- **[Overview](#overview)** - Start here for the key concepts\n\
                     - [Add links to related concepts here]"
                        .to_string(),
                ),
            ],
            footer: format!("**Questions about {lower}?** Open a discussion thread."),
        },
        StubKind::Tutorial => TemplateSpec {
            heading: format!("# Tutorial: {title}"),
            intro: format!(
                "**Learn {lower} through hands-on examples and exercises.**\n\n\
                 **Prerequisites**: [List prerequisites]\n\
                 **Estimated time**: [Time estimate]"
            ),
            sections: vec![
                (
                    "What You'll Learn".to_string(),
                    "By the end of this tutorial, you'll be able to:\n\n\
                     - [Learning objective 1]\n\
                     - [Learning objective 2]\n\
                     - [Learning objective 3]"
                        .to_string(),
                ),
                (
                    "Tutorial Steps".to_string(),
                    "### Step 1: [Setup]\n\n\
                     [Detailed tutorial step with examples]\n\n\
                     ```bash\n\
                     # Example command\n\
                     ```\n\n\
                     ### Step 2: [Main Content]\n\n\
                     [Next tutorial step]"
                        .to_string(),
                ),
                (
                    "Exercises".to_string(),
                    "### Exercise 1: [Exercise Name]\n\n\
                     **Objective**: [What the exercise teaches]\n\
                     **Instructions**: [Step-by-step instructions]"
                        .to_string(),
                ),
                (
                    "Next Steps".to_string(),
                    "- **[Exercises](#exercises)** - Practice what you learned\n\
                     - [Add links to follow-up tutorials here]"
                        .to_string(),
                ),
            ],
            footer: "**Questions about this tutorial?** File an issue so it can be improved."
                .to_string(),
        },
        StubKind::Generic => TemplateSpec {
            heading: format!("# {title}"),
            intro: "**[Brief description of what this document covers]**".to_string(),
            sections: vec![
                ("Overview".to_string(), "[Content overview]".to_string()),
                (
                    "[Section 1]".to_string(),
                    "[Content for section 1]".to_string(),
                ),
                (
                    "[Section 2]".to_string(),
                    "[Content for section 2]".to_string(),
                ),
                (
                    "Related Documentation".to_string(),
                    "- **[Overview](#overview)** - [Description]\n\
                     - [Add links to related documents here]"
                        .to_string(),
                ),
            ],
            footer: "**Need help?** File an issue describing what you expected to find here."
                .to_string(),
        },
    };

    render(&spec)
}

/// Renders one sample architectural decision record. The decision number
/// is parsed from the filename prefix ("001-database-architecture.md"
/// carries number "001").
pub fn render_sample_decision(title: &str, filename: &str) -> String {
    let number = filename.split('-').next().unwrap_or_default();
    format!(
        "# ADR-{number}: {title}\n\
         \n\
         **Status**: Accepted\n\
         **Date**: 2024-01-15\n\
         **Deciders**: Architecture Team\n\
         \n\
         ## Context\n\
         \n\
         This is a sample architectural decision record demonstrating the format\n\
         and structure of the decision records in this documentation set.\n\
         \n\
         ## Decision\n\
         \n\
         We will use this sample record to demonstrate:\n\
         \n\
         - Proper decision record structure and formatting\n\
         - Decision documentation practices\n\
         - Cross-referencing between related records\n\
         \n\
         ## Consequences\n\
         \n\
         ### Positive\n\
         \n\
         - Provides concrete examples for readers\n\
         - Demonstrates the expected record structure\n\
         \n\
         ### Negative\n\
         \n\
         - Requires maintenance to keep the examples current\n\
         \n\
         ## Implementation\n\
         \n\
         This sample record serves as a template and reference for:\n\
         \n\
         1. New teams adopting decision records\n\
         2. Training and onboarding materials\n\
         \n\
         ## Related Decisions\n\
         \n\
         - This is a standalone sample decision\n\
         - The other sample records live in this directory\n\
         \n\
         ---\n\
         \n\
         *This is a sample decision record created for demonstration purposes.*\n"
    )
}
