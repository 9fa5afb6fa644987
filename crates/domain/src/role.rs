use std::fmt::{Display, Formatter};
use std::str::FromStr;

use dancerealmx_core::AppError;
use serde::{Deserialize, Serialize};

/// Platform role tags. The set is closed; users hold any number of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Platform operator with unrestricted access.
    Admin,
    /// Manages instructors and their bookings.
    InstructorAdmin,
    /// Sells curriculum resources on the marketplace.
    CurriculumSeller,
    /// Professional offering bookable sessions and courses.
    BookingProfessional,
    /// Enrolled learner.
    Student,
    /// Account able to book sessions.
    BookingUser,
    /// Anonymous or freshly registered visitor.
    GuestUser,
    /// Moderates the curriculum marketplace.
    CurriculumAdmin,
    /// Curates and publishes platform courses.
    CourseCreatorAdmin,
    /// Issues and revokes certificates.
    CertificationManager,
    /// Listed in the professional directory.
    DirectoryMember,
}

impl Role {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::InstructorAdmin => "INSTRUCTOR_ADMIN",
            Self::CurriculumSeller => "CURRICULUM_SELLER",
            Self::BookingProfessional => "BOOKING_PROFESSIONAL",
            Self::Student => "STUDENT",
            Self::BookingUser => "BOOKING_USER",
            Self::GuestUser => "GUEST_USER",
            Self::CurriculumAdmin => "CURRICULUM_ADMIN",
            Self::CourseCreatorAdmin => "COURSE_CREATOR_ADMIN",
            Self::CertificationManager => "CERTIFICATION_MANAGER",
            Self::DirectoryMember => "DIRECTORY_MEMBER",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[
            Role::Admin,
            Role::InstructorAdmin,
            Role::CurriculumSeller,
            Role::BookingProfessional,
            Role::Student,
            Role::BookingUser,
            Role::GuestUser,
            Role::CurriculumAdmin,
            Role::CourseCreatorAdmin,
            Role::CertificationManager,
            Role::DirectoryMember,
        ];

        ALL
    }

    /// Parses a transport value into a role.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|role| role.as_str() == value)
            .copied()
            .ok_or_else(|| AppError::Validation(format!("unknown role value '{value}'")))
    }
}
