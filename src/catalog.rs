use crate::error::{MaturityError, Result};
use crate::types::record::{MaturityLevel, Relevance};
use crate::types::topic::{topic_index, Topic, TopicId, TOPIC_COUNT};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

const EMBEDDED_TOPICS: [(&str, &str); TOPIC_COUNT] = [
    (
        "Purpose & Context",
        "Purpose and context are the starting point of the asset management system. Purpose is the mission and the value the organization creates for its stakeholders; context is the social, political, economic, technological and internal environment it operates in. Both should be reflected in the SAMP and the asset management objectives, and reviewed regularly with tools such as SWOT and PESTLE.",
    ),
    (
        "Stakeholder Management",
        "A structured, documented approach to identifying, engaging and managing the needs and expectations of those who can affect or be affected by the organization.",
    ),
    (
        "Asset Costing & Valuation",
        "Identifying and recording the full capital and operating costs across the asset life cycle.",
    ),
    (
        "Asset Management Policy",
        "The organization's commitment to asset management and its alignment with the vision and strategic goals.",
    ),
    (
        "Asset Management System (AMS)",
        "The set of related policies, objectives and processes for asset management, aligned with the organization's other management systems.",
    ),
    (
        "Assurance & Audit",
        "Internal and external audits and the three lines of defence model used to improve the AMS.",
    ),
    (
        "Technical Standards & Legislation",
        "Compliance with relevant laws and standards and continuous monitoring of requirements.",
    ),
    (
        "Organizational Structure",
        "Structure, responsibilities and the position of asset management within the organization chart.",
    ),
    (
        "Organizational Culture",
        "Behaviours and attitudes directed at asset management goals; senior management support.",
    ),
    (
        "Competence Management",
        "Assessing and developing skills at every level of the organization.",
    ),
    (
        "Organizational Change Management",
        "Change models (ADKAR, Kotter) and the key success factors of change.",
    ),
    (
        "Demand Analysis",
        "Forecasting future needs as an input to risk and planning.",
    ),
    (
        "Sustainable Development",
        "LCA, carbon reduction and alignment with the SDGs and BS 8900-1.",
    ),
    (
        "Asset Management Strategy & Objectives",
        "Defined in the SAMP, turning policy into SMART actions.",
    ),
    (
        "Asset Management Planning",
        "Operational plans, resources, scheduling and review.",
    ),
    (
        "Shutdown & Outage Strategy",
        "Planning turnarounds for work that cannot be performed during operation.",
    ),
    (
        "Contingency Planning & Resilience",
        "ISO 22301, scenario analysis and rapid recovery.",
    ),
    (
        "Resourcing Strategy & Management",
        "Securing and managing people, equipment and services.",
    ),
    (
        "Supply Chain Management",
        "Selecting and evaluating contractors and managing supply risk.",
    ),
    (
        "Life Cycle Value Realisation",
        "Optimising whole-life value (LCC, TCO, CBA).",
    ),
    (
        "Asset Costing & Valuation (Financial Focus)",
        "Accurate Capex and Opex records and valuation for decision making.",
    ),
    (
        "Decision Making",
        "Methods proportionate to risk and complexity; quantitative tools and risk matrices.",
    ),
    (
        "Asset Creation & Acquisition",
        "From planning to handover, considering RAMS and total cost.",
    ),
    (
        "Systems Engineering",
        "V-model, interface management, ISO 15288.",
    ),
    (
        "Integrated Reliability",
        "RCM, FMECA, redundancy and failure analysis.",
    ),
    (
        "Asset Operations",
        "Service levels, HSE, automation and monitoring.",
    ),
    (
        "Maintenance Delivery",
        "PM and CM, condition monitoring, EAMS and predictive maintenance.",
    ),
    (
        "Fault & Incident Response",
        "FRACAS, RCA, 5 Whys, Ishikawa.",
    ),
    (
        "Asset Rationalisation & Disposal",
        "Reuse, refurbishment, sale, recycling and disposal.",
    ),
    (
        "Data & Information Strategy",
        "Collecting, storing, analysing, securing and deleting data.",
    ),
    (
        "Knowledge Management",
        "Capturing and sharing knowledge, lessons learned, digital twins.",
    ),
    (
        "Data & Information Standards",
        "Classification, condition scales, KPIs and data quality.",
    ),
    (
        "Data & Information Management",
        "Accuracy, currency, security and responsibilities.",
    ),
    (
        "Data & Information Systems",
        "System integration and the cost-benefit of data.",
    ),
    (
        "Configuration Management",
        "Change control, status reporting and audit.",
    ),
    (
        "Risk Assessment & Management",
        "ISO 31000, risk matrices, bow-tie, the 4Ts.",
    ),
    (
        "Monitoring",
        "Financial and non-financial KPIs, service levels and asset condition.",
    ),
    (
        "Continual Improvement",
        "The PDCA cycle and incremental change.",
    ),
    (
        "Management of Change",
        "Identifying, assessing and implementing internal and external changes.",
    ),
    (
        "Outcomes & Impacts",
        "Outputs and effects; value frameworks and the six capitals.",
    ),
];

pub fn embedded_topics() -> Vec<Topic> {
    EMBEDDED_TOPICS
        .iter()
        .enumerate()
        .map(|(index, (name, description))| Topic {
            id: (index + 1) as TopicId,
            name: (*name).to_string(),
            description: (*description).to_string(),
        })
        .collect()
}

/// Read-only topic reference data plus any shape warnings found on load.
#[derive(Debug, Clone)]
pub struct TopicCatalog {
    topics: Vec<Topic>,
    warnings: Vec<String>,
}

impl TopicCatalog {
    pub fn new(topics: Vec<Topic>) -> Self {
        let warnings = shape_warnings(&topics);
        Self { topics, warnings }
    }

    pub fn embedded() -> Self {
        Self::new(embedded_topics())
    }

    /// Loads the catalog file, seeding it from the embedded set when it is absent.
    pub fn load_or_seed(path: &Path) -> Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let seeded = serde_json::to_string_pretty(Self::embedded().topics())?;
            fs::write(path, seeded)?;
            tracing::info!(path = %path.display(), "seeded topic catalog");
        }

        let content = fs::read_to_string(path)?;
        let topics: Vec<Topic> = serde_json::from_str(&content)
            .map_err(|e| MaturityError::Catalog(format!("{}: {}", path.display(), e)))?;
        let catalog = Self::new(topics);
        for warning in &catalog.warnings {
            tracing::warn!(path = %path.display(), "{warning}");
        }
        Ok(catalog)
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn get(&self, id: TopicId) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.id == id)
    }

    pub fn name(&self, id: TopicId) -> String {
        self.get(id)
            .map(|topic| topic.name.clone())
            .unwrap_or_else(|| format!("Topic {id:02}"))
    }
}

/// Answers-file skeleton listing both scales and one entry per catalog topic.
pub fn answer_template(catalog: &TopicCatalog) -> String {
    let mut output = String::new();
    output.push_str("# maturity levels:\n");
    for level in MaturityLevel::ALL {
        output.push_str(&format!("#   {} = {}\n", level.value(), level.label()));
    }
    output.push_str("# relevance:\n");
    for relevance in Relevance::ALL {
        output.push_str(&format!("#   {} = {}\n", relevance.value(), relevance.label()));
    }
    for topic in catalog.topics() {
        output.push_str(&format!(
            "\n# {:02} {}\n[[answers]]\ntopic = {}\nmaturity = 0\nrelevance = 1\n",
            topic.id, topic.name, topic.id
        ));
    }
    output
}

fn shape_warnings(topics: &[Topic]) -> Vec<String> {
    let mut warnings = Vec::new();
    if topics.len() != TOPIC_COUNT {
        warnings.push(format!(
            "topic catalog must contain exactly {TOPIC_COUNT} topics (found {})",
            topics.len()
        ));
    }
    let mut seen = BTreeSet::new();
    for topic in topics {
        if topic_index(topic.id).is_none() {
            warnings.push(format!(
                "topic id {} is outside 1..={TOPIC_COUNT}",
                topic.id
            ));
        } else if !seen.insert(topic.id) {
            warnings.push(format!("topic id {} appears more than once", topic.id));
        }
    }
    warnings
}
