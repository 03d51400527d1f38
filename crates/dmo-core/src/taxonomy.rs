//! # Taxonomy Registry — Single Source of Truth
//!
//! The immutable catalog of impact categories, subcategories and questions,
//! plus the description and mandated controls of every classification
//! level. One registry, compiled in, handed out as `&'static`.
//!
//! ## Structure
//!
//! ```text
//! ImpactCategory (4)
//!   └── Subcategory (11)
//!         └── question text (33)
//! ```
//!
//! Question identity is `(category key, subcategory key, index)`. Display
//! order is declaration order and is never changed at runtime.
//!
//! ## Security Invariant
//!
//! Every key that reaches an assessment record has been resolved through
//! [`TaxonomyRegistry::question`]. Unknown keys are rejected with a
//! [`TaxonomyError`] naming the first component that failed.

use serde::Serialize;

use crate::error::TaxonomyError;
use crate::identity::QuestionId;
use crate::level::ClassificationLevel;

// ─── Catalog Types ───────────────────────────────────────────────────

/// A top-level impact category.
#[derive(Debug, Serialize)]
pub struct ImpactCategory {
    /// Stable key (e.g. `national_interest`).
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Display icon.
    pub icon: &'static str,
    /// Subcategories in display order.
    pub subcategories: &'static [Subcategory],
}

/// A subcategory holding an ordered list of questions.
#[derive(Debug, Serialize)]
pub struct Subcategory {
    /// Stable key, unique within its category.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Question texts; the index into this slice is the question index.
    pub questions: &'static [&'static str],
}

impl ImpactCategory {
    /// Look up a subcategory by key.
    pub fn subcategory(&self, key: &str) -> Option<&'static Subcategory> {
        self.subcategories.iter().find(|s| s.key == key)
    }

    /// Number of questions across all subcategories.
    pub fn question_count(&self) -> usize {
        self.subcategories.iter().map(|s| s.questions.len()).sum()
    }
}

/// A resolved question: validated keys plus its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    /// Category key.
    pub category: &'static str,
    /// Subcategory key.
    pub subcategory: &'static str,
    /// Zero-based index within the subcategory.
    pub index: usize,
    /// Question text.
    pub text: &'static str,
}

impl Question {
    /// Owned identity of this question.
    pub fn id(&self) -> QuestionId {
        QuestionId::new(self.category, self.subcategory, self.index)
    }
}

/// Description and mandated controls of one classification level.
#[derive(Debug, Serialize)]
pub struct LevelProfile {
    /// The level described.
    pub level: ClassificationLevel,
    /// What disclosure of data at this level means.
    pub description: &'static str,
    /// Required controls, in the order they should be presented.
    pub controls: &'static [&'static str],
}

/// One profile per level. A struct rather than a slice so that lookup is
/// an exhaustive match.
#[derive(Debug)]
pub struct LevelTable {
    /// Profile for [`ClassificationLevel::TopSecret`].
    pub top_secret: LevelProfile,
    /// Profile for [`ClassificationLevel::Secret`].
    pub secret: LevelProfile,
    /// Profile for [`ClassificationLevel::Restricted`].
    pub restricted: LevelProfile,
    /// Profile for [`ClassificationLevel::Public`].
    pub public: LevelProfile,
}

// ─── Registry ────────────────────────────────────────────────────────

/// Read-only catalog of the questionnaire and level profiles.
#[derive(Debug)]
pub struct TaxonomyRegistry {
    categories: &'static [ImpactCategory],
    levels: LevelTable,
}

impl TaxonomyRegistry {
    /// Build a registry from static definitions.
    pub const fn new(categories: &'static [ImpactCategory], levels: LevelTable) -> Self {
        Self { categories, levels }
    }

    /// The standard impact taxonomy.
    pub fn standard() -> &'static TaxonomyRegistry {
        &STANDARD
    }

    /// Categories in display order.
    pub fn categories(&self) -> &'static [ImpactCategory] {
        self.categories
    }

    /// Look up a category by key.
    pub fn category(&self, key: &str) -> Option<&'static ImpactCategory> {
        self.categories.iter().find(|c| c.key == key)
    }

    /// Resolve a `(category, subcategory, index)` triple.
    ///
    /// # Errors
    ///
    /// Returns the [`TaxonomyError`] for the first component that does not
    /// resolve.
    pub fn question(
        &self,
        category: &str,
        subcategory: &str,
        index: usize,
    ) -> Result<Question, TaxonomyError> {
        let cat = self
            .category(category)
            .ok_or_else(|| TaxonomyError::UnknownCategory {
                category: category.to_string(),
            })?;
        let sub = cat
            .subcategory(subcategory)
            .ok_or_else(|| TaxonomyError::UnknownSubcategory {
                category: category.to_string(),
                subcategory: subcategory.to_string(),
            })?;
        let text = *sub
            .questions
            .get(index)
            .ok_or_else(|| TaxonomyError::QuestionOutOfRange {
                category: category.to_string(),
                subcategory: subcategory.to_string(),
                index,
                count: sub.questions.len(),
            })?;
        Ok(Question {
            category: cat.key,
            subcategory: sub.key,
            index,
            text,
        })
    }

    /// Resolve a [`QuestionId`].
    pub fn resolve(&self, id: &QuestionId) -> Result<Question, TaxonomyError> {
        self.question(&id.category, &id.subcategory, id.index)
    }

    /// Every question in display order.
    pub fn questions(&self) -> impl Iterator<Item = Question> + '_ {
        self.categories.iter().flat_map(|cat| {
            cat.subcategories.iter().flat_map(move |sub| {
                sub.questions
                    .iter()
                    .enumerate()
                    .map(move |(index, text)| Question {
                        category: cat.key,
                        subcategory: sub.key,
                        index,
                        text: *text,
                    })
            })
        })
    }

    /// Total number of questions, the denominator for progress.
    pub fn total_questions(&self) -> usize {
        self.categories.iter().map(ImpactCategory::question_count).sum()
    }

    /// Description and controls for a level.
    pub fn level_profile(&self, level: ClassificationLevel) -> &LevelProfile {
        match level {
            ClassificationLevel::TopSecret => &self.levels.top_secret,
            ClassificationLevel::Secret => &self.levels.secret,
            ClassificationLevel::Restricted => &self.levels.restricted,
            ClassificationLevel::Public => &self.levels.public,
        }
    }

    /// Profiles for all levels, most severe first.
    pub fn level_profiles(&self) -> impl Iterator<Item = &LevelProfile> + '_ {
        ClassificationLevel::all()
            .iter()
            .map(move |l| self.level_profile(*l))
    }

    /// Required controls for a level, in presentation order.
    pub fn required_controls(&self, level: ClassificationLevel) -> &'static [&'static str] {
        self.level_profile(level).controls
    }
}

// ─── Standard Content ────────────────────────────────────────────────

static STANDARD: TaxonomyRegistry = TaxonomyRegistry::new(STANDARD_CATEGORIES, STANDARD_LEVELS);

const STANDARD_CATEGORIES: &[ImpactCategory] = &[
    ImpactCategory {
        key: "national_interest",
        name: "National Interest",
        icon: "🌍",
        subcategories: &[
            Subcategory {
                key: "reputation",
                name: "Kingdom's Reputation",
                questions: &[
                    "Would this information be subject to national or international media interest?",
                    "Would disclosure give a negative impression of the Kingdom?",
                    "Could this affect diplomatic relationships with other countries?",
                ],
            },
            Subcategory {
                key: "diplomatic",
                name: "Diplomatic Relationships",
                questions: &[
                    "Would this information pose risk to relationships with friendly countries?",
                    "Could it raise international tension?",
                    "Could it lead to protests or sanctions from other countries?",
                ],
            },
            Subcategory {
                key: "security",
                name: "National Security/Public Order",
                questions: &[
                    "Would this information help with terrorist or serious crimes if released?",
                    "Would it create public alarm?",
                    "Could it compromise security or military operations?",
                ],
            },
            Subcategory {
                key: "economy",
                name: "National Economy",
                questions: &[
                    "Would disclosure cause economic losses at national level?",
                    "Could it affect GDP, employment, or market rates?",
                    "Would it impact multiple economic sectors?",
                ],
            },
            Subcategory {
                key: "infrastructure",
                name: "National Infrastructure",
                questions: &[
                    "Could this cause interruption to critical national infrastructure?",
                    "Would it affect energy, transport, or health systems?",
                    "Could it compromise cyber security of critical services?",
                ],
            },
            Subcategory {
                key: "government",
                name: "Government Functions",
                questions: &[
                    "Would this limit government entities ability to operate?",
                    "Could it affect delivery of government services?",
                    "Would it impact government decision-making processes?",
                ],
            },
        ],
    },
    ImpactCategory {
        key: "entity_activities",
        name: "Entity Activities",
        icon: "🏢",
        subcategories: &[
            Subcategory {
                key: "private_profits",
                name: "Profits of Private Entities",
                questions: &[
                    "Would disclosure lead to financial loss or bankruptcy?",
                    "Could it enable fraud or illegal transfers of funds?",
                    "Would it affect private entities operating public facilities?",
                ],
            },
            Subcategory {
                key: "private_functions",
                name: "Functions of Private Entities",
                questions: &[
                    "Would this cause damage to private entities operating public facilities?",
                    "Could it lead to termination of significant employees?",
                    "Would it affect competitiveness of private entities?",
                ],
            },
        ],
    },
    ImpactCategory {
        key: "individuals",
        name: "Individuals",
        icon: "👥",
        subcategories: &[
            Subcategory {
                key: "health_safety",
                name: "Health/Safety of Individuals",
                questions: &[
                    "Would this lead to disclosure of names or locations of individuals?",
                    "Could it expose undercover agents or people under protection?",
                    "Would it cause physical harm or risk to individuals?",
                ],
            },
            Subcategory {
                key: "privacy",
                name: "Privacy",
                questions: &[
                    "Would this violate privacy of individuals?",
                    "Would it infringe intellectual property rights?",
                    "Could it expose personal identifiable information?",
                ],
            },
        ],
    },
    ImpactCategory {
        key: "environment",
        name: "Environment",
        icon: "🌿",
        subcategories: &[Subcategory {
            key: "resources",
            name: "Environmental Resources",
            questions: &[
                "Could this information be used to develop services/products that destroy environmental resources?",
                "Would it cause long-term environmental damage?",
                "Could it affect natural resources of the country?",
            ],
        }],
    },
];

const STANDARD_LEVELS: LevelTable = LevelTable {
    top_secret: LevelProfile {
        level: ClassificationLevel::TopSecret,
        description: "Unauthorized access or disclosure would cause exceptionally grave damage to national interests, security, or critical infrastructure that cannot be remedied.",
        controls: &[
            "Encrypt at rest and in transit with nationally approved cryptography",
            "Restrict access to named individuals holding the required clearance",
            "Process and store only on isolated, accredited networks",
            "Log every access and review the audit trail continuously",
            "Prohibit transfer or hosting outside national borders",
            "Require dual authorization for any export or sharing",
        ],
    },
    secret: LevelProfile {
        level: ClassificationLevel::Secret,
        description: "Unauthorized access or disclosure would cause serious damage to national interests, entity activities, or individuals.",
        controls: &[
            "Encrypt at rest and in transit",
            "Grant access on a strict need-to-know basis with documented approval",
            "Store on approved systems within national borders",
            "Log access and review audit trails regularly",
            "Share with third parties only under a signed data-sharing agreement",
        ],
    },
    restricted: LevelProfile {
        level: ClassificationLevel::Restricted,
        description: "Unauthorized access or disclosure would cause limited harm to entity activities or individuals.",
        controls: &[
            "Limit access to authorized staff of the owning entity",
            "Apply role-based access control",
            "Encrypt when transmitted over public networks",
            "Remove or mask personal identifiers before wider sharing",
        ],
    },
    public: LevelProfile {
        level: ClassificationLevel::Public,
        description: "Disclosure causes no harm; the data may be published as open data.",
        controls: &[
            "Verify accuracy before publication",
            "Protect integrity against unauthorized modification",
            "Publish through approved open-data channels",
        ],
    },
};

// ─── Tests ───────────────────────────────────────────────────────────
