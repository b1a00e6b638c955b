//! `<available_skills>` prompt export.
//!
//! Renders parsed skills into the XML block agents read to discover which
//! skills exist and where their `SKILL.md` lives.

use skillcheck_skills::SkillDocument;

/// Render `skills` as an `<available_skills>` XML document.
pub fn to_prompt(skills: &[SkillDocument]) -> String {
    tracing::debug!("Rendering prompt for {} skills", skills.len());
    let mut output = String::from("<available_skills>\n");

    for skill in skills {
        output.push_str("  <skill>\n");
        push_element(&mut output, "name", &skill.name);
        push_element(&mut output, "description", &skill.description);
        push_element(
            &mut output,
            "location",
            &skill.skill_file().display().to_string(),
        );
        output.push_str("  </skill>\n");
    }

    output.push_str("</available_skills>");
    output
}

fn push_element(output: &mut String, tag: &str, text: &str) {
    output.push_str(&format!("    <{tag}>{}</{tag}>\n", escape_xml(text)));
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_prompt() {
        let skills = vec![
            SkillDocument::new("pdf-processing", "PDF extraction").with_location("/path/to/pdf"),
            SkillDocument::new("data-analysis", "Data analysis").with_location("/path/to/data"),
        ];

        let prompt = to_prompt(&skills);

        for part in [
            "<available_skills>",
            "<skill>",
            "<name>pdf-processing</name>",
            "<description>PDF extraction</description>",
            "<location>/path/to/pdf/SKILL.md</location>",
            "<name>data-analysis</name>",
            "</skill>",
            "</available_skills>",
        ] {
            assert!(prompt.contains(part), "missing {part} in:\n{prompt}");
        }
        assert!(prompt.find("pdf-processing") < prompt.find("data-analysis"));
    }

    #[test]
    fn test_to_prompt_escapes() {
        let skills = vec![SkillDocument::new("x", "Use <b> & \"quotes\"").with_location("/s/x")];
        let prompt = to_prompt(&skills);
        assert!(prompt.contains("<description>Use &lt;b&gt; &amp; &quot;quotes&quot;</description>"));
    }

    #[test]
    fn test_to_prompt_empty() {
        assert_eq!(to_prompt(&[]), "<available_skills>\n</available_skills>");
    }
}
