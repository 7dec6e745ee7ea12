// Full-plan text parser.
//
// Turns the markdown-ish plan text into accordion sections:
// - "## "  starts a section
// - "### " starts a titled subsection inside the current section
// - "# "   opens a section only if none is open yet (document title)
// - anything else is content for the open subsection, or the section's
//   last subsection when none is open
//
// Lines before the first heading are dropped. Content is trimmed, and empty
// subsections / sections are removed.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subsection {
    pub title: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSection {
    pub title: String,
    pub subsections: Vec<Subsection>,
}

#[derive(Default)]
struct Builder {
    sections: Vec<PlanSection>,
    section: Option<PlanSection>,
    subsection: Option<Subsection>,
}

impl Builder {
    fn close_subsection(&mut self) {
        if let (Some(section), Some(sub)) = (self.section.as_mut(), self.subsection.take()) {
            section.subsections.push(sub);
        }
    }

    fn close_section(&mut self) {
        self.close_subsection();
        if let Some(section) = self.section.take() {
            self.sections.push(section);
        }
    }

    fn open_section(&mut self, title: &str) {
        self.close_section();
        self.section = Some(PlanSection { title: title.to_string(), subsections: Vec::new() });
    }

    fn open_subsection(&mut self, title: &str) {
        self.close_subsection();
        self.subsection = Some(Subsection { title: Some(title.to_string()), content: String::new() });
    }

    fn push_line(&mut self, line: &str) {
        if let Some(sub) = self.subsection.as_mut() {
            if !sub.content.is_empty() {
                sub.content.push('\n');
            }
            sub.content.push_str(line);
        } else if let Some(section) = self.section.as_mut() {
            match section.subsections.last_mut() {
                Some(last) => {
                    last.content.push('\n');
                    last.content.push_str(line);
                }
                None => section.subsections.push(Subsection { title: None, content: line.to_string() }),
            }
        }
    }

    fn finish(mut self) -> Vec<PlanSection> {
        self.close_section();
        self.sections
            .into_iter()
            .map(|section| PlanSection {
                title: section.title,
                subsections: section
                    .subsections
                    .into_iter()
                    .map(|sub| Subsection { title: sub.title, content: sub.content.trim().to_string() })
                    .filter(|sub| !sub.content.is_empty() || sub.title.is_some())
                    .collect(),
            })
            .filter(|section| !section.subsections.is_empty())
            .collect()
    }
}

pub fn parse_full_plan(text: &str) -> Vec<PlanSection> {
    let mut b = Builder::default();
    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if let Some(title) = line.strip_prefix("## ") {
            b.open_section(title);
        } else if let Some(title) = line.strip_prefix("### ") {
            b.open_subsection(title);
        } else if let Some(title) = line.strip_prefix("# ") {
            if b.section.is_none() {
                b.section = Some(PlanSection { title: title.to_string(), subsections: Vec::new() });
            }
        } else {
            b.push_line(line);
        }
    }
    b.finish()
}
