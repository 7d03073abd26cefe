//! Demo seed data for local development.

use clinic_types::{NonEmptyText, Role};

use crate::error::WorkflowResult;
use crate::model::User;
use crate::store::ClinicStore;

/// Populates the store with a pair of doctors, a nurse and two patients
/// so the dashboards have something to show.
pub fn seed_demo_data(store: &dyn ClinicStore) -> WorkflowResult<Vec<User>> {
    let staff = [
        ("Dr. Emily Stone", Role::Doctor, "AVAILABLE"),
        ("Dr. James Wilson", Role::Doctor, "AVAILABLE"),
        ("Nurse Sarah Johnson", Role::Nurse, "AVAILABLE"),
        ("John Doe", Role::Patient, "WAITING"),
        ("Jane Smith", Role::Patient, "WAITING"),
    ];

    let mut seeded = Vec::with_capacity(staff.len());
    for (name, role, status) in staff {
        let user = store.save_user(User::new(NonEmptyText::new(name)?, role, status));
        seeded.push(user);
    }

    tracing::info!(count = seeded.len(), "seeded demo users");
    Ok(seeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[test]
    fn test_seed_creates_expected_roles() {
        let store = MemoryStore::new();
        let seeded = seed_demo_data(&store).expect("seeding should succeed");
        assert_eq!(seeded.len(), 5);

        assert_eq!(store.users_with_role(Role::Doctor).len(), 2);
        assert_eq!(store.users_with_role(Role::Nurse).len(), 1);
        assert_eq!(store.users_with_role(Role::Patient).len(), 2);
        assert_eq!(store.users_with_status("AVAILABLE").len(), 3);
    }
}
