//! Built-in course catalog, applied on first boot.

use skilltree_common::store::CourseSeed;

/// Courses inserted if the catalog table is empty of them.
/// `seed_courses` is insert-or-ignore, so edits here never clobber rows
/// an operator has changed in place.
pub fn default_catalog() -> Vec<CourseSeed> {
    vec![
        CourseSeed {
            id: "net-fundamentals",
            title: "Networking Fundamentals",
            description: "The OSI model, cabling, and how frames move through a switch.",
            total_lessons: 3,
            xp_reward: 300,
            difficulty: "Beginner",
            category: "Networking",
        },
        CourseSeed {
            id: "ip-addressing",
            title: "IP Addressing & Subnetting",
            description: "IPv4 addressing, subnet masks, CIDR, and VLSM practice.",
            total_lessons: 4,
            xp_reward: 400,
            difficulty: "Beginner",
            category: "Networking",
        },
        CourseSeed {
            id: "routing-basics",
            title: "Routing Basics",
            description: "Static routes, default gateways, and an introduction to OSPF.",
            total_lessons: 4,
            xp_reward: 500,
            difficulty: "Intermediate",
            category: "Routing",
        },
        CourseSeed {
            id: "network-security",
            title: "Network Security Essentials",
            description: "ACLs, port security, and common attack surfaces on the LAN.",
            total_lessons: 5,
            xp_reward: 600,
            difficulty: "Advanced",
            category: "Security",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        let catalog = default_catalog();
        let mut ids: Vec<_> = catalog.iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_catalog_rewards_divide_cleanly() {
        // Equal-division lesson XP should not truncate for the built-ins.
        for course in default_catalog() {
            assert!(course.total_lessons > 0);
            assert_eq!(course.xp_reward % course.total_lessons as u64, 0, "{}", course.id);
        }
    }
}
