//! Integration tests for folio-manifest.
//!
//! These tests load a full profile manifest and drive the counters it
//! configures end-to-end.

use folio_core::{CountingNumber, ManualFrameScheduler, ManualVisibility, Section};
use folio_manifest::{Manifest, ManifestError, SkillLevel};
use std::rc::Rc;

const PROFILE_YAML: &str = r#"
folio: "0.1"
profile:
  name: Jordan Lee
  headline: Junior Data Scientist & Analyst
  summary: Turning raw data into decisions.
  available: true
  photo: /profile.jpg
  resume: /resume.pdf

navigation:
  home: Welcome
  experience: Career

stats:
  - label: Projects delivered
    target: 10
    suffix: "+"
  - label: Years of experience
    target: 2
    suffix: "+"
  - label: Technologies mastered
    target: 10
    suffix: "+"

skills:
  - name: Python
    level: expert
  - name: Excel
    level: expert
  - name: Power BI
    level: intermediate

projects:
  - title: Sales forecasting
    description: Predictive model for monthly sales
    tech: [Python, Scikit-learn, Pandas]
    code_url: "https://example.com/code"
  - title: Customer segmentation
    description: Clustering customers for marketing
    tech: [Python, K-means]

experience:
  - title: Machine Learning Engineer
    company: Example Labs
    period: "2025"
    description: Predictive models and exploratory analysis
  - title: Data Analyst
    company: Example Insurance
    period: 2023 - 2025

contact:
  email: jordan@example.com
  linkedin: https://www.linkedin.com/in/jordan-lee
"#;

#[test]
fn test_load_full_profile() {
    let manifest = Manifest::load(PROFILE_YAML).expect("valid manifest");

    assert_eq!(manifest.profile.headline, "Junior Data Scientist & Analyst");
    assert_eq!(manifest.profile.resume.as_deref(), Some("/resume.pdf"));
    assert_eq!(manifest.skills.len(), 3);
    assert_eq!(
        manifest
            .skills
            .iter()
            .filter(|s| s.level == SkillLevel::Expert)
            .count(),
        2
    );
    assert_eq!(manifest.projects[0].tech.len(), 3);
    assert!(manifest.projects[1].code_url.is_none());
    assert_eq!(manifest.experience[1].description, "");
    assert_eq!(manifest.contact.email.as_deref(), Some("jordan@example.com"));
}

#[test]
fn test_navigation_labels() {
    let manifest = Manifest::load(PROFILE_YAML).expect("valid manifest");
    let labels: Vec<&str> = manifest.nav_links().into_iter().map(|(_, l)| l).collect();
    assert_eq!(
        labels,
        vec!["Welcome", "About", "Skills", "Projects", "Career", "Contact"]
    );
    assert_eq!(manifest.nav_label(Section::Experience), "Career");
}

#[test]
fn test_stats_drive_counters() {
    let manifest = Manifest::load(PROFILE_YAML).expect("valid manifest");
    let scheduler = Rc::new(ManualFrameScheduler::new());
    let visibility = Rc::new(ManualVisibility::new());

    let counters: Vec<_> = manifest
        .counter_configs()
        .expect("valid stats")
        .into_iter()
        .enumerate()
        .map(|(i, config)| {
            let mut counter = CountingNumber::new(config, scheduler.clone(), visibility.clone());
            counter.bind(i);
            counter
        })
        .collect();

    for i in 0..counters.len() {
        visibility.enter(&i);
    }
    scheduler.run_frame(0.0);
    scheduler.run_frame(1000.0);
    let halfway: Vec<String> = counters.iter().map(CountingNumber::display).collect();
    assert_eq!(halfway, vec!["5+", "1+", "5+"]);

    scheduler.run_frame(2000.0);
    let done: Vec<String> = counters.iter().map(CountingNumber::display).collect();
    assert_eq!(done, vec!["10+", "2+", "10+"]);
}

#[test]
fn test_load_rejects_negative_stat() {
    let yaml = r#"
folio: "0.1"
profile:
  name: Jordan Lee
stats:
  - label: Broken
    target: -1
"#;
    let err = Manifest::load(yaml).expect_err("negative target");
    assert!(matches!(err, ManifestError::InvalidValue { .. }));
}

#[test]
fn test_load_rejects_missing_profile() {
    let err = Manifest::load("folio: \"0.1\"\n").expect_err("profile is required");
    assert!(matches!(err, ManifestError::Yaml(_)));
}
