use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::markers::Marker::{self, Clock, GreenDot, OrangeDot, Star};
use crate::types::{Catalog, RichText, Template};

/// Description used for any template that does not bring its own
pub const GENERIC_DESCRIPTION: &str = "<div><p>Organize your tasks by dispatching them across the pipeline.<br/>\
Collaborate efficiently by chatting in real-time or via email.</p>\
<p>Move tasks to the next stage as they progress, and fold the stages that are finished.</p></div>";

const AGILE_SCRUM_DESCRIPTION: &str = "<div><p>Plan your work in sprints.<br/>\
Pull stories from the backlog into the sprint backlog, work them through, and close the sprint once every story is done.</p></div>";

const DIGITAL_MARKETING_DESCRIPTION: &str = "<div><p>Take your content from idea to publication.<br/>\
Research, write and edit each piece before it goes live.</p></div>";

const CUSTOMER_FEEDBACK_DESCRIPTION: &str = "<div><p>Collect feedback from your customers and decide which requests make it into development.</p></div>";

const CONSULTING_DESCRIPTION: &str = "<div><p>Manage the lifecycle of your consulting engagements, from new projects through resource allocation to delivery.</p></div>";

const RESEARCH_PROJECT_DESCRIPTION: &str = "<div><p>Handle your idea gathering within tasks and drive them from brainstorm through research to a final document.</p></div>";

const TSHIRT_PRINTING_DESCRIPTION: &str = "<div><p>Follow each order from the moment it comes in until the shirts leave the press.</p></div>";

static DEFAULT_CATALOG: Lazy<Arc<Catalog>> = Lazy::new(|| Arc::new(build_default_catalog()));

/// Built-in catalog used when nothing has been registered under the lookup key
pub fn default_catalog() -> Arc<Catalog> {
    Arc::clone(&DEFAULT_CATALOG)
}

fn template(
    name: &str,
    columns: &[&str],
    folded: &[&str],
    description: &str,
    bullets: &[Marker],
) -> Template {
    Template {
        name: name.to_string(),
        columns: columns.iter().map(|c| c.to_string()).collect(),
        folded_columns: folded.iter().map(|c| c.to_string()).collect(),
        description: RichText::new(description),
        bullets: bullets.to_vec(),
        fold_field: None,
    }
}

fn build_default_catalog() -> Catalog {
    Catalog {
        fold_field: "fold".to_string(),
        allowed_group_bys: vec!["stage_id".to_string()],
        apply_examples_text: "Use This For My Project".to_string(),
        ghost_columns: ["New", "Assigned", "In Progress", "Done"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        examples: vec![
            template(
                "Software Development",
                &["Backlog", "Specifications", "Development", "Tests"],
                &["Delivered"],
                GENERIC_DESCRIPTION,
                &[GreenDot, OrangeDot, Star],
            ),
            template(
                "Agile Scrum",
                &["Backlog", "Sprint Backlog", "Sprint in Progress"],
                &["Sprint Complete", "Old Completed Sprint"],
                AGILE_SCRUM_DESCRIPTION,
                &[GreenDot, OrangeDot],
            ),
            template(
                "Digital Marketing",
                &["Ideas", "Researching", "Writing", "Editing"],
                &["Done"],
                DIGITAL_MARKETING_DESCRIPTION,
                &[GreenDot, OrangeDot],
            ),
            template(
                "Customer Feedback",
                &["New", "In development"],
                &["Done", "Refused"],
                CUSTOMER_FEEDBACK_DESCRIPTION,
                &[GreenDot, OrangeDot],
            ),
            template(
                "Consulting",
                &["New Projects", "Resources Allocation", "In Progress"],
                &["Done"],
                CONSULTING_DESCRIPTION,
                &[GreenDot, OrangeDot],
            ),
            template(
                "Research Project",
                &["Brainstorm", "Research", "Draft"],
                &["Final Document"],
                RESEARCH_PROJECT_DESCRIPTION,
                &[GreenDot, OrangeDot],
            ),
            template(
                "Website Redesign",
                &["Page Ideas", "Copywriting", "Design"],
                &["Live"],
                RESEARCH_PROJECT_DESCRIPTION,
                &[],
            ),
            template(
                "T-shirt Printing",
                &["New Orders", "Logo Design", "To Print"],
                &["Done"],
                TSHIRT_PRINTING_DESCRIPTION,
                &[Star],
            ),
            template(
                "Design",
                &["New Request", "Design", "Client Review"],
                &["Handoff"],
                GENERIC_DESCRIPTION,
                &[GreenDot, OrangeDot, Star, Clock],
            ),
            template(
                "Publishing",
                &["Ideas", "Writing", "Editing"],
                &["Published"],
                GENERIC_DESCRIPTION,
                &[GreenDot, OrangeDot, Star, Clock],
            ),
            template(
                "Manufacturing",
                &["New Orders", "Material Sourcing", "Manufacturing", "Assembling"],
                &["Delivered"],
                GENERIC_DESCRIPTION,
                &[GreenDot, OrangeDot, Star, Clock],
            ),
            template(
                "Podcast and Video Production",
                &["Research", "Script", "Recording", "Mixing"],
                &["Published"],
                GENERIC_DESCRIPTION,
                &[GreenDot, OrangeDot, Star, Clock],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_shape() {
        let catalog = default_catalog();
        assert_eq!(catalog.fold_field, "fold");
        assert_eq!(catalog.allowed_group_bys, vec!["stage_id".to_string()]);
        assert_eq!(catalog.ghost_columns.len(), 4);
        assert_eq!(catalog.examples.len(), 12);
        assert_eq!(catalog.examples[0].name, "Software Development");
        assert_eq!(catalog.examples[1].name, "Agile Scrum");
        assert_eq!(catalog.examples[11].name, "Podcast and Video Production");
    }

    #[test]
    fn test_default_catalog_is_shared() {
        assert!(Arc::ptr_eq(&default_catalog(), &default_catalog()));
    }

    #[test]
    fn test_website_redesign_has_no_markers() {
        let catalog = default_catalog();
        let redesign = catalog
            .examples
            .iter()
            .find(|t| t.name == "Website Redesign")
            .unwrap();
        assert!(redesign.bullets.is_empty());
    }
}
