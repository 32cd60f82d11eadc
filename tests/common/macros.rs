/// Asserts that a conservation residual is within tolerance.
#[macro_export]
macro_rules! assert_conserved {
    ($stats:expr, $tol:expr) => {
        assert!(
            $stats.energy_error.abs() < $tol,
            "Conservation residual {} exceeds {}",
            $stats.energy_error,
            $tol
        );
    };
}

/// Asserts that no grid cell and no agent holds negative energy.
#[macro_export]
macro_rules! assert_non_negative {
    ($state:expr) => {
        for (i, &cell) in $state.grid.cells.iter().enumerate() {
            assert!(cell >= 0.0, "Cell {} is negative: {}", i, cell);
        }
        for (i, agent) in $state.agents.iter().enumerate() {
            assert!(
                agent.energy >= 0.0,
                "Agent {} has negative energy: {}",
                i,
                agent.energy
            );
        }
    };
}
