//! Role allow-list checks

use bri11iant_dom::ElementRef;

use super::{RuleContext, role_of};
use crate::aria::{RoleAllowance, allowed_roles};
use crate::finding::Finding;
use crate::messages;

/// Compare `role` against an allowance, naming the element in the message
pub(super) fn check_allowance(elem: &ElementRef<'_>, allowance: RoleAllowance) -> Option<Finding> {
    let role = role_of(elem)?;
    if allowance.permits(role) {
        return None;
    }

    let tag = elem.tag();
    let message = match allowance {
        RoleAllowance::NoRole => messages::no_roles_allowed(tag),
        _ => messages::role_not_allowed(role.trim(), tag),
    };
    Some(Finding::information(message))
}

pub(super) fn check_role_allowance(elem: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Option<Finding> {
    check_allowance(elem, allowed_roles(elem.tag())?)
}

/// A figure with a caption is already exposed as `figure`
pub(super) fn check_figure_role(elem: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Option<Finding> {
    elem.find_descendant("figcaption")?;
    check_allowance(elem, RoleAllowance::NoRole)
}

pub(super) fn check_link_role(elem: &ElementRef<'_>, _ctx: &RuleContext<'_>) -> Option<Finding> {
    if !elem.has_attr("href") {
        return None;
    }
    check_allowance(elem, RoleAllowance::NoRole)
}
