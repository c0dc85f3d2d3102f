//! Static registry of available frameworks and their variants

use colored::Color;

/// Branch fetched for frameworks that declare no variants
pub const DEFAULT_BRANCH: &str = "main";

/// A named branch of a framework
#[derive(Debug, PartialEq, Eq)]
pub struct Variant {
    pub branch: &'static str,
    pub display: &'static str,
    pub color: Color,
}

/// A project template family, one repository per framework
#[derive(Debug, PartialEq, Eq)]
pub struct Framework {
    pub repo: &'static str,
    pub display: &'static str,
    pub color: Color,
    pub download_url: &'static str,
    pub start_command: &'static str,
    pub variants: &'static [Variant],
}

impl Framework {
    pub fn label(&self) -> &'static str {
        if self.display.is_empty() {
            self.repo
        } else {
            self.display
        }
    }

    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    pub fn variant(&self, branch: &str) -> Option<&'static Variant> {
        self.variants.iter().find(|v| v.branch == branch)
    }

    /// Template names selectable via `--template`
    pub fn templates(&self) -> Vec<&'static str> {
        if self.has_variants() {
            self.variants.iter().map(|v| v.branch).collect()
        } else {
            vec![self.repo]
        }
    }
}

impl Variant {
    pub fn label(&self) -> &'static str {
        if self.display.is_empty() {
            self.branch
        } else {
            self.display
        }
    }
}

/// Immutable set of frameworks offered by a product
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    frameworks: &'static [Framework],
}

/// A `--template` argument resolved against the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateMatch {
    pub framework: &'static Framework,
    pub variant: Option<&'static Variant>,
}

impl Catalog {
    pub const fn new(frameworks: &'static [Framework]) -> Self {
        Self { frameworks }
    }

    pub fn frameworks(&self) -> &'static [Framework] {
        self.frameworks
    }

    pub fn framework(&self, repo: &str) -> Option<&'static Framework> {
        self.frameworks.iter().find(|f| f.repo == repo)
    }

    /// All template names across every framework
    pub fn templates(&self) -> Vec<&'static str> {
        self.frameworks.iter().flat_map(|f| f.templates()).collect()
    }

    /// Find the framework (and variant) that owns a template name
    pub fn find_template(&self, name: &str) -> Option<TemplateMatch> {
        self.frameworks.iter().find_map(|framework| {
            if framework.has_variants() {
                framework.variant(name).map(|variant| TemplateMatch {
                    framework,
                    variant: Some(variant),
                })
            } else if framework.repo == name {
                Some(TemplateMatch {
                    framework,
                    variant: None,
                })
            } else {
                None
            }
        })
    }

    /// Whether a framework/branch pair exists in this catalog
    pub fn resolves(&self, framework: &Framework, branch: &str) -> bool {
        self.framework(framework.repo).is_some_and(|f| {
            if f.has_variants() {
                f.variant(branch).is_some()
            } else {
                branch == DEFAULT_BRANCH
            }
        })
    }
}

/// Frameworks published by Scaffoldly
pub const FRAMEWORKS: &[Framework] = &[Framework {
    repo: "stack-aws-serverless-express",
    display: "Serverless + Express on AWS",
    color: Color::Yellow,
    download_url: "https://codeload.github.com/scaffoldly",
    start_command: "yarn dev",
    variants: &[
        Variant {
            branch: "headless",
            display: "Backend API (No Frontend)",
            color: Color::Blue,
        },
        Variant {
            branch: "react-vite",
            display: "Backend API + React Frontend (w/Vite)",
            color: Color::Blue,
        },
        Variant {
            branch: "angular",
            display: "Backend API + Angular Frontend",
            color: Color::Blue,
        },
    ],
}];

pub static CATALOG: Catalog = Catalog::new(FRAMEWORKS);

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_FRAMEWORKS: &[Framework] = &[
        Framework {
            repo: "with-variants",
            display: "With Variants",
            color: Color::Yellow,
            download_url: "https://example.com",
            start_command: "yarn dev",
            variants: &[
                Variant {
                    branch: "one",
                    display: "One",
                    color: Color::Blue,
                },
                Variant {
                    branch: "two",
                    display: "",
                    color: Color::Blue,
                },
            ],
        },
        Framework {
            repo: "plain",
            display: "",
            color: Color::Green,
            download_url: "https://example.com",
            start_command: "npm start",
            variants: &[],
        },
    ];

    #[test]
    fn test_templates_lists_branches_or_repo() {
        let catalog = Catalog::new(TEST_FRAMEWORKS);
        assert_eq!(catalog.templates(), vec!["one", "two", "plain"]);
    }

    #[test]
    fn test_find_template_by_branch() {
        let catalog = Catalog::new(TEST_FRAMEWORKS);
        let found = catalog.find_template("two").unwrap();
        assert_eq!(found.framework.repo, "with-variants");
        assert_eq!(found.variant.unwrap().branch, "two");
    }

    #[test]
    fn test_find_template_by_repo_without_variants() {
        let catalog = Catalog::new(TEST_FRAMEWORKS);
        let found = catalog.find_template("plain").unwrap();
        assert_eq!(found.framework.repo, "plain");
        assert!(found.variant.is_none());

        // A repo with variants is not itself a template
        assert!(catalog.find_template("with-variants").is_none());
        assert!(catalog.find_template("missing").is_none());
    }

    #[test]
    fn test_labels_fall_back_to_identifiers() {
        let catalog = Catalog::new(TEST_FRAMEWORKS);
        assert_eq!(catalog.framework("plain").unwrap().label(), "plain");
        let with = catalog.framework("with-variants").unwrap();
        assert_eq!(with.label(), "With Variants");
        assert_eq!(with.variant("two").unwrap().label(), "two");
    }

    #[test]
    fn test_resolves() {
        let catalog = Catalog::new(TEST_FRAMEWORKS);
        let with = &TEST_FRAMEWORKS[0];
        let plain = &TEST_FRAMEWORKS[1];
        assert!(catalog.resolves(with, "one"));
        assert!(!catalog.resolves(with, "three"));
        assert!(catalog.resolves(plain, DEFAULT_BRANCH));
        assert!(!catalog.resolves(plain, "dev"));
    }

    #[test]
    fn test_builtin_catalog_has_react_vite() {
        let found = CATALOG.find_template("react-vite").unwrap();
        assert_eq!(found.framework.repo, "stack-aws-serverless-express");
        assert_eq!(found.framework.start_command, "yarn dev");
    }
}
