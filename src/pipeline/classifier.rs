//! Descriptor classification.
//!
//! Pure mapping from a [`NodeDescriptor`] to the buckets it belongs to,
//! driven by [`ClassificationRules`]. Every descriptor is in Full; the
//! Debug and Essentials rules are evaluated independently.

use crate::config::ClassificationRules;
use crate::types::{BucketSet, NodeDescriptor, NodeKind};

/// Stateless classifier over a rule table
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'r> {
    rules: &'r ClassificationRules,
}

impl<'r> Classifier<'r> {
    pub fn new(rules: &'r ClassificationRules) -> Self {
        Self { rules }
    }

    pub fn classify(&self, descriptor: &NodeDescriptor) -> BucketSet {
        BucketSet {
            essentials: self.is_essential(descriptor),
            debug: self.rules.is_debug_name(&descriptor.stripped_name()),
        }
    }

    fn is_essential(&self, descriptor: &NodeDescriptor) -> bool {
        let rules = self.rules;

        (descriptor.kind == NodeKind::ControlFlow
            && rules.is_essential_control_flow(&descriptor.node_type))
            || rules.is_essential_member(&descriptor.member_name)
            || rules.is_essential_math(&descriptor.owner_path, &descriptor.member_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bucket;
    use proptest::prelude::*;

    const MATH_OWNER: &str = "/Script/CoreUObject.Class'/Script/Engine.KismetMathLibrary'";
    const ACTOR_OWNER: &str = "/Script/CoreUObject.Class'/Script/Engine.Actor'";

    fn call(name: &str, member: &str, owner: &str) -> NodeDescriptor {
        let mut desc = NodeDescriptor::new(name, NodeKind::CallFunction);
        desc.member_name = member.to_string();
        desc.owner_path = owner.to_string();
        desc
    }

    fn control_flow(name: &str, node_type: &str) -> NodeDescriptor {
        let mut desc = NodeDescriptor::new(name, NodeKind::ControlFlow);
        desc.node_type = node_type.to_string();
        desc
    }

    #[test]
    fn test_print_string_is_debug() {
        let rules = ClassificationRules::default();
        let buckets = Classifier::new(&rules).classify(&call(
            "Print String",
            "PrintString",
            "/Script/CoreUObject.Class'/Script/Engine.KismetSystemLibrary'",
        ));
        assert!(buckets.debug);
        assert!(!buckets.essentials);
        assert!(buckets.contains(Bucket::Full));
    }

    #[test]
    fn test_branch_is_essential() {
        let rules = ClassificationRules::default();
        let classifier = Classifier::new(&rules);
        assert!(classifier.classify(&control_flow("Branch", "K2Node_IfThenElse")).essentials);
        assert!(
            classifier
                .classify(&control_flow("Sequence", "K2Node_ExecutionSequence"))
                .essentials
        );
    }

    #[test]
    fn test_control_flow_marker_requires_control_flow_kind() {
        let rules = ClassificationRules::default();
        let mut desc = call("If Then Else", "IfThenElseHelper", ACTOR_OWNER);
        desc.node_type = "K2Node_IfThenElse".to_string();
        assert!(!Classifier::new(&rules).classify(&desc).essentials);
    }

    #[test]
    fn test_math_member_depends_on_owner() {
        let rules = ClassificationRules::default();
        let classifier = Classifier::new(&rules);
        assert!(
            classifier
                .classify(&call("Add Vector Vector", "Add_VectorVector", MATH_OWNER))
                .essentials
        );
        assert!(
            !classifier
                .classify(&call("Add Vector Vector", "Add_VectorVector", ACTOR_OWNER))
                .essentials
        );
    }

    #[test]
    fn test_allow_listed_members() {
        let rules = ClassificationRules::default();
        let classifier = Classifier::new(&rules);
        for member in ["Delay", "RetriggerableDelay", "IsValid"] {
            assert!(classifier.classify(&call(member, member, ACTOR_OWNER)).essentials);
        }
    }

    #[test]
    fn test_debug_uses_display_name_not_member_name() {
        let rules = ClassificationRules::default();
        let buckets = Classifier::new(&rules).classify(&call("Log Message", "PrintString", ACTOR_OWNER));
        assert!(!buckets.debug);
    }

    proptest! {
        #[test]
        fn test_classification_is_deterministic(
            name in "[A-Za-z ]{0,24}",
            member in "[A-Za-z_]{0,24}",
            math_owner in any::<bool>(),
        ) {
            let rules = ClassificationRules::default();
            let owner = if math_owner { MATH_OWNER } else { ACTOR_OWNER };
            let desc = call(&name, &member, owner);
            let classifier = Classifier::new(&rules);

            // Property: same descriptor, same verdict, and always in Full
            let first = classifier.classify(&desc);
            prop_assert_eq!(first, classifier.classify(&desc));
            prop_assert!(first.contains(Bucket::Full));
        }

        #[test]
        fn test_whitespace_does_not_affect_debug(
            prefix in "[A-Za-z]{0,8}",
            spaces in " {0,3}",
        ) {
            let rules = ClassificationRules::default();
            let classifier = Classifier::new(&rules);
            let spaced = format!("{}Print{}String", prefix, spaces);
            let desc = call(&spaced, "Anything", ACTOR_OWNER);
            prop_assert!(classifier.classify(&desc).debug);
        }
    }
}
