//! # Record Source
//!
//! Read-only supplier of everything the hub displays. The core never writes
//! back; edits live in the [`Session`](crate::session::Session) that was
//! seeded from a source.

use crate::competency::CompetencyCatalog;
use crate::directory::{Role, User, UserStatus};
use crate::feedback::{FeedbackSheet, SkillComparison};
use crate::grid::Individual;
use crate::pdi::{DevelopmentGoal, GoalStatus};
use crate::team::{EvaluationStatus, StepStatus, TeamMember};
use chrono::NaiveDate;

/// Evaluation cycle used when a source does not name one.
pub const DEFAULT_CYCLE: &str = "2025.1";

/// Supplier of records. Implementations decide where data comes from.
pub trait RecordSource {
    fn catalog(&self) -> CompetencyCatalog;

    /// People plotted on the talent grid, in display order.
    fn individuals(&self) -> Vec<Individual>;

    fn team(&self) -> Vec<TeamMember>;

    fn goals(&self) -> Vec<DevelopmentGoal>;

    fn users(&self) -> Vec<User>;

    fn feedback(&self) -> FeedbackSheet;

    fn cycle(&self) -> String {
        DEFAULT_CYCLE.to_string()
    }

    /// Last day of the evaluation period.
    fn deadline(&self) -> NaiveDate {
        date(2025, 3, 31)
    }
}

/// Built-in demo data.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedRecords;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn member(
    id: u64,
    name: &str,
    role: &str,
    status: EvaluationStatus,
    progress: u8,
    self_eval: StepStatus,
    peer_evals: u8,
    manager_eval: StepStatus,
) -> TeamMember {
    TeamMember {
        id,
        name: name.to_string(),
        role: role.to_string(),
        status,
        progress,
        self_eval,
        peer_evals,
        manager_eval,
    }
}

fn user(id: u64, name: &str, email: &str, role: Role, department: &str, status: UserStatus) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        role,
        department: department.to_string(),
        status,
    }
}

impl RecordSource for SeedRecords {
    fn catalog(&self) -> CompetencyCatalog {
        CompetencyCatalog::standard()
    }

    fn individuals(&self) -> Vec<Individual> {
        vec![
            Individual::new(1, "John Doe", 70.0, 80.0),
            Individual::new(2, "Sarah Johnson", 85.0, 85.0),
            Individual::new(3, "Michael Chen", 45.0, 60.0),
            Individual::new(4, "Emily Rodriguez", 75.0, 50.0),
            Individual::new(5, "David Kim", 55.0, 85.0),
            Individual::new(6, "Lisa Anderson", 30.0, 40.0),
        ]
    }

    fn team(&self) -> Vec<TeamMember> {
        use EvaluationStatus as E;
        use StepStatus as S;
        vec![
            member(1, "John Doe", "Consultant", E::InProgress, 45, S::Completed, 2, S::Pending),
            member(2, "Sarah Johnson", "Senior Consultant", E::Completed, 100, S::Completed, 3, S::Completed),
            member(3, "Michael Chen", "Junior Consultant", E::NotStarted, 0, S::NotStarted, 0, S::NotStarted),
            member(4, "Emily Rodriguez", "Consultant", E::InProgress, 75, S::Completed, 2, S::InProgress),
        ]
    }

    fn goals(&self) -> Vec<DevelopmentGoal> {
        vec![
            DevelopmentGoal {
                id: 1,
                title: "Complete AWS Certification".to_string(),
                description: "Obtain AWS Solutions Architect Associate certification to enhance cloud infrastructure knowledge".to_string(),
                deadline: date(2025, 6, 30),
                certification: Some("AWS Solutions Architect".to_string()),
                status: GoalStatus::InProgress,
                progress: 65,
            },
            DevelopmentGoal {
                id: 2,
                title: "Lead Cross-functional Project".to_string(),
                description: "Successfully deliver a major client project involving multiple departments".to_string(),
                deadline: date(2025, 4, 15),
                certification: None,
                status: GoalStatus::InProgress,
                progress: 40,
            },
            DevelopmentGoal {
                id: 3,
                title: "Improve Public Speaking".to_string(),
                description: "Complete presentation skills workshop and deliver quarterly team presentations".to_string(),
                deadline: date(2025, 2, 28),
                certification: None,
                status: GoalStatus::Overdue,
                progress: 20,
            },
        ]
    }

    fn users(&self) -> Vec<User> {
        use Role::{Admin, Employee, Manager};
        use UserStatus::{Active, Inactive};
        vec![
            user(1, "Gabriel Lopes", "gabriel.lopes@nordica.com", Admin, "TI", Active),
            user(2, "Maria Silva", "maria.silva@nordica.com", Manager, "RH", Active),
            user(3, "João Santos", "joao.santos@nordica.com", Employee, "Vendas", Active),
            user(4, "Ana Costa", "ana.costa@nordica.com", Employee, "Marketing", Inactive),
            user(5, "Carlos Oliveira", "carlos.oliveira@nordica.com", Manager, "Financeiro", Active),
        ]
    }

    fn feedback(&self) -> FeedbackSheet {
        FeedbackSheet {
            period: DEFAULT_CYCLE.to_string(),
            comparisons: vec![
                SkillComparison::new("Leadership", 4, 4),
                SkillComparison::new("Communication", 5, 4),
                SkillComparison::new("Technical", 4, 5),
                SkillComparison::new("Teamwork", 5, 5),
                SkillComparison::new("Innovation", 3, 4),
                SkillComparison::new("Delivery", 4, 3),
            ],
            strengths: "Consistently strong communication and teamwork; mentors junior team members."
                .to_string(),
            development_areas: "Deepen cloud architecture expertise and propose more new solutions."
                .to_string(),
            next_cycle_goals: vec![
                "Lead at least one major client project independently".to_string(),
                "Complete AWS Solutions Architect certification".to_string(),
                "Mentor two junior consultants".to_string(),
                "Present findings at quarterly leadership meeting".to_string(),
            ],
            acknowledged: false,
            signed_on: None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TalentGrid;
    use crate::team::TeamSummary;

    #[test]
    fn seed_grid_matches_known_placements() {
        let grid = TalentGrid::classify(&SeedRecords.individuals());
        let coordinate = |id| grid.placement_of(id).map(|p| p.cell.coordinate());
        assert_eq!(coordinate(1), Some((2, 2)));
        assert_eq!(coordinate(2), Some((2, 2)));
        assert_eq!(coordinate(3), Some((1, 1)));
        assert_eq!(coordinate(4), Some((2, 1)));
        assert_eq!(coordinate(6), Some((0, 1)));
    }

    #[test]
    fn seed_team_summary() {
        let summary = TeamSummary::from_members(&SeedRecords.team());
        assert_eq!((summary.total, summary.completed, summary.in_progress), (4, 1, 2));
    }

    #[test]
    fn seed_ids_are_unique() {
        let users = SeedRecords.users();
        let mut ids: Vec<u64> = users.iter().map(|u| u.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), users.len());
        assert_eq!(SeedRecords.cycle(), "2025.1");
    }
}
