//! Builders for outline documents used by CLI tests.

use serde::Serialize;

/// One outline entry with a fluent API for optional fields.
#[derive(Debug, Clone, Serialize)]
pub struct TestNode {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    active: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<TestNode>,
}

impl TestNode {
    /// Creates an entry whose slug will be derived from `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: None,
            order: None,
            active: None,
            children: Vec::new(),
        }
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    /// Marks the entry inactive.
    pub fn inactive(mut self) -> Self {
        self.active = Some(false);
        self
    }

    pub fn child(mut self, child: TestNode) -> Self {
        self.children.push(child);
        self
    }
}

/// A whole outline document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TestOutline {
    exams: Vec<TestNode>,
}

impl TestOutline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exam(mut self, exam: TestNode) -> Self {
        self.exams.push(exam);
        self
    }

    /// Serializes the outline as JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("outline serialization is infallible")
    }

    /// The tree used by most CLI tests:
    ///
    /// ```text
    /// neet
    ///   physics
    ///     mechanics
    ///       kinematics
    ///       dynamics
    ///     optics (inactive)
    ///   chemistry
    /// jee
    /// ```
    pub fn standard() -> Self {
        Self::new()
            .exam(
                TestNode::new("NEET")
                    .child(
                        TestNode::new("Physics")
                            .child(
                                TestNode::new("Mechanics")
                                    .child(TestNode::new("Kinematics"))
                                    .child(TestNode::new("Dynamics")),
                            )
                            .child(TestNode::new("Optics").inactive()),
                    )
                    .child(TestNode::new("Chemistry")),
            )
            .exam(TestNode::new("JEE"))
    }
}
