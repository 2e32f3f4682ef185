//! Static access policy for request actions.
//!
//! Every action maps to one rule: the role the caller must hold, if any, and
//! the relationship the caller must have with the target request. Services
//! consult the policy once, before looking at request state.

use super::{Dispatch, RequestAction, ServiceRequest, TransitionAction};
use crate::identity::{Actor, Role, UserId};
use std::fmt;
use thiserror::Error;

/// Relationship an actor must have with the target request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relationship {
    /// No relationship needed.
    Any,
    /// The actor raised the request.
    Requester,
    /// The actor is the assigned mechanic.
    Assignee,
    /// The actor is the assigned mechanic, or the request is a broadcast any
    /// mechanic may try to claim. Whether the claim is still open is a state
    /// question, answered by the request itself.
    AssigneeOrClaimant,
    /// The actor is the requester or the assignee.
    Participant,
}

impl Relationship {
    fn holds(self, actor: UserId, request: Option<&ServiceRequest>) -> bool {
        let Some(target) = request else {
            return self == Self::Any;
        };
        match self {
            Self::Any => true,
            Self::Requester => target.requester() == actor,
            Self::Assignee => target.assignee() == Some(actor),
            Self::AssigneeOrClaimant => {
                target.assignee() == Some(actor) || target.dispatch() == Dispatch::Broadcast
            }
            Self::Participant => target.is_participant(actor),
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Any => "anyone",
            Self::Requester => "requester",
            Self::Assignee => "assigned mechanic",
            Self::AssigneeOrClaimant => "assigned or claiming mechanic",
            Self::Participant => "participant",
        })
    }
}

/// Errors returned when the policy denies an action.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    /// The actor's role may not perform the action.
    #[error("a {role} may not {action}")]
    RoleNotPermitted {
        /// Denied action.
        action: RequestAction,
        /// Actor role.
        role: Role,
    },

    /// The actor lacks the required relationship with the request.
    #[error("user {actor} must be the {relationship} to {action}")]
    NotRelated {
        /// Denied action.
        action: RequestAction,
        /// Acting user.
        actor: UserId,
        /// Required relationship.
        relationship: Relationship,
    },
}

struct Rule {
    role: Option<Role>,
    relationship: Relationship,
}

const fn rule_for(action: RequestAction) -> Rule {
    use Relationship::{Any, Assignee, AssigneeOrClaimant, Participant, Requester};
    let (role, relationship) = match action {
        RequestAction::Create => (Some(Role::Customer), Any),
        RequestAction::Transition(TransitionAction::Accept) => {
            (Some(Role::Mechanic), AssigneeOrClaimant)
        }
        RequestAction::Transition(
            TransitionAction::Reject | TransitionAction::Start | TransitionAction::Complete,
        ) => (Some(Role::Mechanic), Assignee),
        RequestAction::ReRaise | RequestAction::Rate | RequestAction::SubmitFeedback => {
            (Some(Role::Customer), Requester)
        }
        RequestAction::SendChatMessage | RequestAction::ViewChat => (None, Participant),
        RequestAction::ListCustomerRequests => (Some(Role::Customer), Any),
        RequestAction::ListMechanicRequests => (Some(Role::Mechanic), Any),
        RequestAction::AdminOverride => (Some(Role::Admin), Any),
    };
    Rule { role, relationship }
}

/// Capability check performed at the service boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy;

impl AccessPolicy {
    /// Returns the role required for `action`, if any.
    #[must_use]
    pub const fn required_role(action: RequestAction) -> Option<Role> {
        rule_for(action).role
    }

    /// Returns the relationship required for `action`.
    #[must_use]
    pub const fn required_relationship(action: RequestAction) -> Relationship {
        rule_for(action).relationship
    }

    /// Checks whether `actor` may perform `action` on `request`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError::RoleNotPermitted`] when the role does
    /// not match, and [`AuthorizationError::NotRelated`] when the actor lacks
    /// the required relationship with the request.
    pub fn authorize(
        action: RequestAction,
        actor: &Actor,
        request: Option<&ServiceRequest>,
    ) -> Result<(), AuthorizationError> {
        let rule = rule_for(action);
        if rule.role.is_some_and(|role| actor.role() != role) {
            return Err(AuthorizationError::RoleNotPermitted {
                action,
                role: actor.role(),
            });
        }
        if !rule.relationship.holds(actor.id(), request) {
            return Err(AuthorizationError::NotRelated {
                action,
                actor: actor.id(),
                relationship: rule.relationship,
            });
        }
        Ok(())
    }
}
