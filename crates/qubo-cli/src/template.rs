//! Starter solver written by `qubo-cli init`
//!
//! The template satisfies every guideline: helpers come before `solve`,
//! `solve` is the last definition, and it ends with a tuple return.

const TEMPLATE: &str = r#"# {name}: QUBO solver
#
# Upload requirements:
#   - `{entry_point}` is the entry point and receives the QUBO matrix first
#   - `{entry_point}` returns its results with a single return statement
#   - no function definitions after `{entry_point}` (put helpers above it)
import time

import numpy as np


def compute_cost(qubo_matrix, solution, constant):
    """
    Computes the cost for a given solution based on the QUBO matrix and constant.
    """
    return solution @ qubo_matrix @ solution.T + constant


def {entry_point}(qubo_matrix, constant=0.0, initial_temperature=1000, cooling_rate=0.99, max_iterations=1000):
    """
    Implements Simulated Annealing for QUBO optimization.
    """
    num_vars = qubo_matrix.shape[0]
    current_solution = np.random.randint(0, 2, num_vars)
    current_cost = compute_cost(qubo_matrix, current_solution, constant)

    best_solution = current_solution.copy()
    best_cost = current_cost
    costs_per_iteration = []
    temperature = initial_temperature
    start_time = time.time()

    for _ in range(max_iterations):
        # Flip a random bit
        neighbor = current_solution.copy()
        flip_index = np.random.randint(num_vars)
        neighbor[flip_index] = 1 - neighbor[flip_index]

        neighbor_cost = compute_cost(qubo_matrix, neighbor, constant)
        cost_difference = neighbor_cost - current_cost
        if cost_difference < 0 or np.random.rand() < np.exp(-cost_difference / temperature):
            current_solution = neighbor
            current_cost = neighbor_cost
            if current_cost < best_cost:
                best_solution = current_solution.copy()
                best_cost = current_cost

        costs_per_iteration.append(current_cost)
        temperature *= cooling_rate

    elapsed_time = time.time() - start_time
    return best_solution, best_cost, costs_per_iteration, elapsed_time
"#;

/// Render the starter solver for `name`
pub fn render(name: &str, entry_point: &str) -> String {
    TEMPLATE
        .replace("{name}", name)
        .replace("{entry_point}", entry_point)
}
