//! Static description of every engine: display name, family and complexity.

use serde::Serialize;

use crate::id::AlgorithmId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Sorting,
    Searching,
    Graph,
    DynamicProgramming,
    Recursion,
    Tree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeComplexity {
    pub best: &'static str,
    pub average: &'static str,
    pub worst: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub id: AlgorithmId,
    pub name: &'static str,
    pub category: Category,
    pub description: &'static str,
    pub time: TimeComplexity,
    pub space: &'static str,
}

const fn time(best: &'static str, average: &'static str, worst: &'static str) -> TimeComplexity {
    TimeComplexity {
        best,
        average,
        worst,
    }
}

const fn uniform(bound: &'static str) -> TimeComplexity {
    time(bound, bound, bound)
}

/// Every engine in [`AlgorithmId::ALL`] order.
pub static CATALOG: [AlgorithmInfo; 20] = [
    AlgorithmInfo {
        id: AlgorithmId::Bubble,
        name: "Bubble Sort",
        category: Category::Sorting,
        description: "Repeatedly swaps adjacent out-of-order pairs; each pass fixes the largest remaining element.",
        time: time("O(n)", "O(n^2)", "O(n^2)"),
        space: "O(1)",
    },
    AlgorithmInfo {
        id: AlgorithmId::Selection,
        name: "Selection Sort",
        category: Category::Sorting,
        description: "Selects the minimum of the unsorted suffix and swaps it into place.",
        time: uniform("O(n^2)"),
        space: "O(1)",
    },
    AlgorithmInfo {
        id: AlgorithmId::Insertion,
        name: "Insertion Sort",
        category: Category::Sorting,
        description: "Shifts larger elements right to insert each key into the sorted prefix.",
        time: time("O(n)", "O(n^2)", "O(n^2)"),
        space: "O(1)",
    },
    AlgorithmInfo {
        id: AlgorithmId::Merge,
        name: "Merge Sort",
        category: Category::Sorting,
        description: "Splits the array in half recursively and merges the sorted halves.",
        time: uniform("O(n log n)"),
        space: "O(n)",
    },
    AlgorithmInfo {
        id: AlgorithmId::Quick,
        name: "Quick Sort",
        category: Category::Sorting,
        description: "Partitions around the last element (Lomuto) and sorts both sides recursively.",
        time: time("O(n log n)", "O(n log n)", "O(n^2)"),
        space: "O(log n)",
    },
    AlgorithmInfo {
        id: AlgorithmId::LinearSearch,
        name: "Linear Search",
        category: Category::Searching,
        description: "Scans left to right until the target is found.",
        time: time("O(1)", "O(n)", "O(n)"),
        space: "O(1)",
    },
    AlgorithmInfo {
        id: AlgorithmId::BinarySearch,
        name: "Binary Search",
        category: Category::Searching,
        description: "Halves the search range of a sorted array on every comparison.",
        time: time("O(1)", "O(log n)", "O(log n)"),
        space: "O(1)",
    },
    AlgorithmInfo {
        id: AlgorithmId::Bfs,
        name: "Breadth-First Search",
        category: Category::Graph,
        description: "Visits nodes level by level from the start node using a FIFO queue.",
        time: uniform("O(V + E)"),
        space: "O(V)",
    },
    AlgorithmInfo {
        id: AlgorithmId::Dfs,
        name: "Depth-First Search",
        category: Category::Graph,
        description: "Follows each edge as deep as possible before backtracking.",
        time: uniform("O(V + E)"),
        space: "O(V)",
    },
    AlgorithmInfo {
        id: AlgorithmId::Dijkstra,
        name: "Dijkstra's Algorithm",
        category: Category::Graph,
        description: "Single-source shortest paths over non-negative directed edge weights.",
        time: uniform("O(V^2 + E)"),
        space: "O(V)",
    },
    AlgorithmInfo {
        id: AlgorithmId::Knapsack01,
        name: "0/1 Knapsack",
        category: Category::DynamicProgramming,
        description: "Best total value of items that fit a weight capacity, each item used at most once.",
        time: uniform("O(n*W)"),
        space: "O(n*W)",
    },
    AlgorithmInfo {
        id: AlgorithmId::Lcs,
        name: "Longest Common Subsequence",
        category: Category::DynamicProgramming,
        description: "Longest sequence of characters appearing in order in both strings.",
        time: uniform("O(n*m)"),
        space: "O(n*m)",
    },
    AlgorithmInfo {
        id: AlgorithmId::CoinChange,
        name: "Coin Change",
        category: Category::DynamicProgramming,
        description: "Fewest coins summing to an amount with unlimited coins of each denomination.",
        time: uniform("O(n*amount)"),
        space: "O(amount)",
    },
    AlgorithmInfo {
        id: AlgorithmId::GridPaths,
        name: "Grid Paths",
        category: Category::DynamicProgramming,
        description: "Counts right/down paths across a grid while avoiding obstacles.",
        time: uniform("O(rows*cols)"),
        space: "O(rows*cols)",
    },
    AlgorithmInfo {
        id: AlgorithmId::NQueens,
        name: "N-Queens",
        category: Category::Recursion,
        description: "Places N non-attacking queens on an NxN board by backtracking.",
        time: uniform("O(N!)"),
        space: "O(N)",
    },
    AlgorithmInfo {
        id: AlgorithmId::Factorial,
        name: "Factorial",
        category: Category::Recursion,
        description: "n! computed by direct recursion.",
        time: uniform("O(n)"),
        space: "O(n)",
    },
    AlgorithmInfo {
        id: AlgorithmId::Fibonacci,
        name: "Fibonacci",
        category: Category::Recursion,
        description: "fib(n) by recursion with memoization.",
        time: uniform("O(n)"),
        space: "O(n)",
    },
    AlgorithmInfo {
        id: AlgorithmId::Inorder,
        name: "Inorder Traversal",
        category: Category::Tree,
        description: "Left subtree, node, right subtree.",
        time: uniform("O(n)"),
        space: "O(h)",
    },
    AlgorithmInfo {
        id: AlgorithmId::Preorder,
        name: "Preorder Traversal",
        category: Category::Tree,
        description: "Node, left subtree, right subtree.",
        time: uniform("O(n)"),
        space: "O(h)",
    },
    AlgorithmInfo {
        id: AlgorithmId::Postorder,
        name: "Postorder Traversal",
        category: Category::Tree,
        description: "Left subtree, right subtree, node.",
        time: uniform("O(n)"),
        space: "O(h)",
    },
];

/// Catalog entry for `id`.
pub fn info(id: AlgorithmId) -> &'static AlgorithmInfo {
    // CATALOG is in AlgorithmId::ALL order; the test below pins that.
    &CATALOG[id as usize]
}
