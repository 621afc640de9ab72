//! Concept parts: the smallest unit describing one data-collection field.

/// One quadruple from a node's `ruleparts` list.
///
/// Rule fragments decide which node one can travel to, e.g. when
/// `(Typetumor equals NET/NEC)` holds, take the edge labeled accordingly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleFragment {
    pub element_operator: String,
    pub operator: String,
    pub test: String,
    pub reference: String,
}

impl RuleFragment {
    /// Renders the fragment as `elementOperator reference operator test`,
    /// trimmed.
    pub fn render(&self) -> String {
        format!(
            "{} {} {} {}",
            self.element_operator, self.reference, self.operator, self.test
        )
        .trim()
        .to_string()
    }
}

/// One entry from a node's `validation_rules` list, e.g. a mandatory marker
/// or a numeric-range constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationRule {
    pub rule_type: String,
    pub message: String,
}

impl ValidationRule {
    /// The message when present, otherwise the bare rule type.
    pub fn render(&self) -> &str {
        if self.message.is_empty() && !self.rule_type.is_empty() {
            &self.rule_type
        } else {
            &self.message
        }
    }
}

/// One field description inside a node's `parts` list.
///
/// The `eligible` flag is set during the connectivity walk when the part
/// individually satisfies the eligibility predicate for its owning node's
/// kind; only eligible parts become codebook items.
#[derive(Debug, Clone, Default)]
pub struct ConceptPart {
    pub caption: String,
    pub path: String,
    pub data_type: String,
    pub name: String,
    pub log: String,
    /// Explicit rule marker, used by router nodes as the routed field.
    pub rule: String,
    pub options: Vec<String>,
    pub rule_fragments: Vec<RuleFragment>,
    pub validation_rules: Vec<ValidationRule>,
    pub eligible: bool,
}

impl ConceptPart {
    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn has_log(&self) -> bool {
        !self.log.is_empty()
    }

    /// The part's rule fragments rendered and joined with single spaces;
    /// empty when the part has no fragments.
    pub fn fragment_rule(&self) -> String {
        self.rule_fragments
            .iter()
            .map(RuleFragment::render)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Rendered validation rules, in list order.
    pub fn rendered_validation_rules(&self) -> Vec<String> {
        self.validation_rules
            .iter()
            .map(|rule| rule.render().to_string())
            .collect()
    }
}
