//! Dependency synthesis from fixed architectural heuristics.
//!
//! Edges are a pure function of which component ids were discovered; issue
//! content never influences the graph. Emission order follows the rule
//! table, and duplicate edges are preserved (the webapp/core pair can be
//! produced by both the frontend rule and the core fallback).

use crate::models::analysis::{ComponentId, Dependency, DependencyKind};

/// Derive the directed edge set for the discovered components.
///
/// `present` is the ordered list of component ids in discovery order; the
/// fallback rules iterate it in that order.
pub fn synthesize(present: &[ComponentId]) -> Vec<Dependency> {
    use ComponentId::*;

    let has = |id: ComponentId| present.contains(&id);
    let mut dependencies = Vec::new();
    let mut push = |source: ComponentId, target: ComponentId, kind: DependencyKind| {
        dependencies.push(Dependency { source, target, kind });
    };

    // Main application flow
    if has(Webapp) && has(Rest) {
        push(Webapp, Rest, DependencyKind::Http);
    }
    if has(Rest) && has(Service) {
        push(Rest, Service, DependencyKind::Internal);
    }
    if has(Service) && has(Model) {
        push(Service, Model, DependencyKind::Internal);
    }
    if has(Service) && has(Persistence) {
        push(Service, Persistence, DependencyKind::Internal);
    }
    if has(Persistence) && has(Model) {
        push(Persistence, Model, DependencyKind::Internal);
    }

    // Frontend-only applications talk to core directly
    if has(Webapp) && has(Core) && !has(Rest) {
        push(Webapp, Core, DependencyKind::Internal);
    }

    // Core is foundational; everything leans on it when present
    if has(Core) {
        if has(Service) {
            push(Service, Core, DependencyKind::Internal);
        }
        if has(Rest) {
            push(Rest, Core, DependencyKind::Internal);
        }
        if !has(Service) && !has(Rest) {
            for &id in present {
                if !matches!(id, Core | Utils | Config | BuildConfig) {
                    push(id, Core, DependencyKind::Internal);
                }
            }
        }
    }

    // Shared utilities
    if has(Utils) {
        let major: Vec<ComponentId> = [Webapp, Service, Rest, Persistence, Core]
            .into_iter()
            .filter(|id| has(*id))
            .collect();

        for &id in &major {
            push(id, Utils, DependencyKind::Internal);
        }

        if major.is_empty() {
            for &id in present {
                if !matches!(id, Utils | Config | BuildConfig) {
                    push(id, Utils, DependencyKind::Internal);
                }
            }
        }
    }

    // Configuration feeds the entry points
    for &config_id in present
        .iter()
        .filter(|id| matches!(id, Config | BuildConfig))
    {
        let entry_points: Vec<ComponentId> = [Webapp, Service, Rest]
            .into_iter()
            .filter(|id| has(*id))
            .collect();

        if !entry_points.is_empty() {
            for &entry in &entry_points {
                push(config_id, entry, DependencyKind::Build);
            }
        } else if has(Core) {
            push(config_id, Core, DependencyKind::Build);
        }
    }

    dependencies
}

#[cfg(test)]
mod tests {
    use super::*;
    use ComponentId::*;

    fn edge(source: ComponentId, target: ComponentId, kind: DependencyKind) -> Dependency {
        Dependency { source, target, kind }
    }

    #[test]
    fn test_three_tier_flow() {
        let deps = synthesize(&[Webapp, Rest, Service]);
        assert_eq!(
            deps,
            vec![
                edge(Webapp, Rest, DependencyKind::Http),
                edge(Rest, Service, DependencyKind::Internal),
            ]
        );
    }

    #[test]
    fn test_full_backend_stack() {
        let deps = synthesize(&[Service, Model, Persistence]);
        assert_eq!(
            deps,
            vec![
                edge(Service, Model, DependencyKind::Internal),
                edge(Service, Persistence, DependencyKind::Internal),
                edge(Persistence, Model, DependencyKind::Internal),
            ]
        );
    }

    #[test]
    fn test_no_edges_touch_absent_components() {
        let present = [Webapp, Rest, Service];
        for dep in synthesize(&present) {
            assert!(present.contains(&dep.source));
            assert!(present.contains(&dep.target));
        }
    }

    #[test]
    fn test_core_fallback_when_no_backend_layers() {
        let deps = synthesize(&[Model, Core, Controller]);
        assert_eq!(
            deps,
            vec![
                edge(Model, Core, DependencyKind::Internal),
                edge(Controller, Core, DependencyKind::Internal),
            ]
        );
    }

    #[test]
    fn test_webapp_core_duplicate_is_preserved() {
        // Both the frontend rule and the core fallback fire for this pair
        let deps = synthesize(&[Webapp, Core]);
        assert_eq!(
            deps,
            vec![
                edge(Webapp, Core, DependencyKind::Internal),
                edge(Webapp, Core, DependencyKind::Internal),
            ]
        );
    }

    #[test]
    fn test_utils_connects_major_components() {
        let deps = synthesize(&[Service, Utils, Persistence]);
        assert!(deps.contains(&edge(Service, Utils, DependencyKind::Internal)));
        assert!(deps.contains(&edge(Persistence, Utils, DependencyKind::Internal)));
        // Major component order is fixed, not discovery order
        let utils_edges: Vec<&Dependency> =
            deps.iter().filter(|d| d.target == Utils).collect();
        assert_eq!(utils_edges[0].source, Service);
        assert_eq!(utils_edges[1].source, Persistence);
    }

    #[test]
    fn test_utils_fallback_without_major_components() {
        let deps = synthesize(&[Model, Utils, Controller]);
        assert_eq!(
            deps,
            vec![
                edge(Model, Utils, DependencyKind::Internal),
                edge(Controller, Utils, DependencyKind::Internal),
            ]
        );
    }

    #[test]
    fn test_config_feeds_entry_points() {
        let deps = synthesize(&[Webapp, Service, BuildConfig]);
        assert!(deps.contains(&edge(BuildConfig, Webapp, DependencyKind::Build)));
        assert!(deps.contains(&edge(BuildConfig, Service, DependencyKind::Build)));
    }

    #[test]
    fn test_config_falls_back_to_core() {
        let deps = synthesize(&[Core, Config]);
        assert_eq!(deps, vec![edge(Config, Core, DependencyKind::Build)]);
    }

    #[test]
    fn test_config_without_targets_emits_nothing() {
        let deps = synthesize(&[Config, Model]);
        assert!(deps.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(synthesize(&[]).is_empty());
    }
}
