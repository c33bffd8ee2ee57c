//! # Portfolio Content
//!
//! Every piece of static text the commands show. The built-in default is
//! the stock profile; a JSON file can replace any subset of it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A downloadable or viewable document (`cat <name>`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub label: String,
    pub href: String,
}

/// A titled link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Ok,
    Num,
}

/// One row of the `status` summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub kind: MetricKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub date: String,
    pub title: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub name: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub period: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub email: Option<String>,
    pub form_href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Portfolio {
    /// Base for relative links
    pub site_url: String,
    pub headline: String,
    pub details: String,
    pub files: Vec<FileEntry>,
    pub status: Vec<Metric>,
    pub blog: Vec<Post>,
    pub skills: Vec<SkillGroup>,
    pub social: Vec<Link>,
    pub contact: Contact,
    pub timeline: Vec<Milestone>,
    pub achievements: Vec<String>,
    pub boot_lines: Vec<String>,
}

impl Portfolio {
    /// Load content overrides; missing fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading content file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing content file {}", path.display()))
    }

    pub fn file(&self, name: &str) -> Option<&FileEntry> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Resolve a possibly relative href against the site URL
    pub fn absolute(&self, href: &str) -> String {
        if href.contains("://") || href.starts_with("mailto:") {
            return href.to_string();
        }
        format!(
            "{}/{}",
            self.site_url.trim_end_matches('/'),
            href.trim_start_matches('/')
        )
    }
}

fn link(label: &str, href: &str) -> Link {
    Link {
        label: label.to_string(),
        href: href.to_string(),
    }
}

fn metric(label: &str, value: &str, kind: MetricKind) -> Metric {
    Metric {
        label: label.to_string(),
        value: value.to_string(),
        kind,
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self {
            site_url: crate::config::DEFAULT_ORIGIN.to_string(),
            headline: "Mohammad Shirvani (Radikal) — Web3 Researcher • DeFi • Security Engineer"
                .to_string(),
            details: "ENS: Radikal.eth | Shahrekord | Software Engineering @ TVU".to_string(),
            files: vec![
                FileEntry {
                    name: "resume".to_string(),
                    label: "Radikal-CV.pdf".to_string(),
                    href: "/profile-card/Radikal-CV.pdf".to_string(),
                },
                FileEntry {
                    name: "projects".to_string(),
                    label: "Projects".to_string(),
                    href: "/profile-card/projects.html".to_string(),
                },
            ],
            status: vec![
                metric("System", "OK", MetricKind::Ok),
                metric("Nodes", "17 active", MetricKind::Num),
                metric("Uptime", "99.9%", MetricKind::Ok),
                metric("Rewards", "$20K+", MetricKind::Num),
            ],
            blog: vec![Post {
                date: "latest".to_string(),
                title: "All posts".to_string(),
                href: "/profile-card/blog.html".to_string(),
            }],
            skills: vec![
                SkillGroup {
                    name: "Security".to_string(),
                    items: vec![
                        "smart-contract audits".to_string(),
                        "threat modelling".to_string(),
                    ],
                },
                SkillGroup {
                    name: "DeFi".to_string(),
                    items: vec!["protocol research".to_string(), "MEV".to_string()],
                },
                SkillGroup {
                    name: "Infra".to_string(),
                    items: vec!["node operations".to_string(), "RPC tooling".to_string()],
                },
            ],
            social: vec![
                link("ENS", "https://app.ens.domains/radikal.eth"),
                link("Web", "https://radikal.eth.limo"),
            ],
            contact: Contact {
                email: None,
                form_href: "/profile-card/contact.html".to_string(),
            },
            timeline: vec![
                Milestone {
                    period: "now".to_string(),
                    title: "Web3 research: DeFi and security".to_string(),
                },
                Milestone {
                    period: "ops".to_string(),
                    title: "Node operations, 17 active nodes".to_string(),
                },
                Milestone {
                    period: "study".to_string(),
                    title: "Software Engineering @ TVU".to_string(),
                },
            ],
            achievements: vec![
                "$20K+ in node rewards".to_string(),
                "99.9% validator uptime".to_string(),
            ],
            boot_lines: vec![
                "> initializing system modules...".to_string(),
                "> loading node metrics...".to_string(),
                "> verifying RPC connections...".to_string(),
                "> security daemon: OK".to_string(),
                "> environment: stable".to_string(),
                "Radikal CLI v7.3 ready.".to_string(),
                "Type 'help' to begin.".to_string(),
            ],
        }
    }
}
