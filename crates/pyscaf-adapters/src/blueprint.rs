//! The built-in project blueprint.
//!
//! [`builtin_blueprint`] is the single entry-point for the file tree that
//! ships with Pyscaf. Contents use `{{VAR}}` for user parameters and
//! `__TOKEN__` for computed values (version matrix, year); conditional nodes
//! carry [`Emit`] markers so one tree serves every parameter combination.
//!
//! GitHub Actions expressions (`${{ … }}`) pass through substitution
//! untouched: variables are replaced by exact name, and the token alphabet
//! is uppercase-only.

use pyscaf_core::domain::{
    Assistant, Blueprint, Emit, FileContent, FileSpec, ProjectType, TemplateSource,
};

// ── Root files ────────────────────────────────────────────────────────────────

const PYPROJECT_STANDARD: &str = r#"[build-system]
requires = ["hatchling"]
build-backend = "hatchling.build"

[project]
name = "{{REPO_NAME}}"
version = "0.1.0"
description = "{{DESCRIPTION}}"
readme = "README.md"
requires-python = ">=__PY_MIN__"
license = { text = "MIT" }
authors = [{ name = "{{AUTHOR}}" }]
dependencies = []

[project.optional-dependencies]
dev = [
    "pytest>=8.0",
    "pytest-cov>=5.0",
    "ruff>=0.8",
    "mypy>=1.14",
    "pre-commit>=4.0",
    "typeguard>=4.0",
]

[tool.hatch.build.targets.wheel]
packages = ["src/{{PACKAGE_NAME}}"]

[tool.ruff]
target-version = "py__PY_MIN_NODOT__"
line-length = 100

[tool.ruff.lint]
select = ["E", "F", "I", "UP", "B", "SIM"]

[tool.mypy]
python_version = "__PY_MIN__"
strict = true
packages = ["{{PACKAGE_NAME}}"]
mypy_path = "src"

[tool.pytest.ini_options]
testpaths = ["tests"]
addopts = "--cov={{PACKAGE_NAME}} --cov-report=term-missing"
markers = [
    "unit: mark test as a unit test",
    "integration: mark test as an integration test",
    "slow: mark test as slow (can be skipped)",
]

[tool.coverage.run]
source = ["src"]
"#;

const PYPROJECT_PAPER: &str = r#"[build-system]
requires = ["hatchling"]
build-backend = "hatchling.build"

[project]
name = "{{REPO_NAME}}"
version = "0.1.0"
description = "{{DESCRIPTION}}"
readme = "README.md"
requires-python = ">=__PY_MIN__"
license = { text = "MIT" }
authors = [{ name = "{{AUTHOR}}" }]
dependencies = []

[project.optional-dependencies]
dev = [
    "pytest>=8.0",
    "pytest-cov>=5.0",
    "ruff>=0.8",
    "mypy>=1.14",
    "pre-commit>=4.0",
    "typeguard>=4.0",
]
paper = [
    "matplotlib>=3.9",
    "pandas>=2.2",
    "jupyter>=1.0",
]

[tool.hatch.build.targets.wheel]
packages = ["src/{{PACKAGE_NAME}}"]

[tool.ruff]
target-version = "py__PY_MIN_NODOT__"
line-length = 100

[tool.ruff.lint]
select = ["E", "F", "I", "UP", "B", "SIM"]

[tool.mypy]
python_version = "__PY_MIN__"
strict = true
packages = ["{{PACKAGE_NAME}}"]
mypy_path = "src"

[tool.pytest.ini_options]
testpaths = ["tests"]
addopts = "--cov={{PACKAGE_NAME}} --cov-report=term-missing"
markers = [
    "unit: mark test as a unit test",
    "integration: mark test as an integration test",
    "slow: mark test as slow (can be skipped)",
]

[tool.coverage.run]
source = ["src"]
"#;

const README: &str = r#"# {{PROJECT_NAME}}

{{DESCRIPTION}}

![Python](https://img.shields.io/badge/python-__PY_MIN__%2B-blue)

## Requirements

- Python __PY_MIN__ or newer (tested up to __PY_MAX__)
- [uv](https://docs.astral.sh/uv/) recommended for dependency management

## Getting started

```bash
uv pip install -e ".[dev]"
cp .env.example .env
pytest
```

## Development

Lint, type-check, and test before pushing:

```bash
ruff check src tests
mypy src
pytest -m "not slow"
```

Pre-commit hooks run the same checks automatically:

```bash
pre-commit install
```
"#;

const GITIGNORE: &str = r#"__pycache__/
*.py[cod]
*.egg-info/
.eggs/
build/
dist/
.venv/
venv/
.env
.coverage
htmlcov/
.pytest_cache/
.mypy_cache/
.ruff_cache/
.ipynb_checkpoints/
paper/build/
"#;

const ENV_EXAMPLE: &str = r#"# Copy to .env and adjust.
# Enable runtime type-checking of this package during development.
DEV_TYPECHECK=0
"#;

const PRE_COMMIT_CONFIG: &str = r#"repos:
  - repo: https://github.com/pre-commit/pre-commit-hooks
    rev: v5.0.0
    hooks:
      - id: trailing-whitespace
      - id: end-of-file-fixer
      - id: check-yaml
      - id: check-toml
      - id: check-added-large-files
  - repo: https://github.com/astral-sh/ruff-pre-commit
    rev: v0.8.4
    hooks:
      - id: ruff
        args: [--fix]
      - id: ruff-format
{{MYPY_REPOS}}"#;

const CHANGELOG: &str = r#"# Changelog

All notable changes to this project will be documented in this file.

The format is based on [Keep a Changelog](https://keepachangelog.com/en/1.1.0/).

## [Unreleased]

### Added

- Initial project structure.
"#;

const CONTRIBUTING: &str = r#"# Contributing to {{PROJECT_NAME}}

## Setup

```bash
uv pip install -e ".[dev]"
pre-commit install
```

## Workflow

1. Create a branch from `main`.
2. Make your change, with tests.
3. Run `ruff check`, `mypy src`, and `pytest` locally.
4. Open a pull request. CI runs the same checks on every supported
   Python version.

## Commit messages

Use the imperative mood ("Add X", not "Added X") and explain *why* in the
body when the change is not obvious.
"#;

const LICENSE_MIT: &str = r#"MIT License

Copyright (c) __YEAR__ {{AUTHOR}}

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
"#;

// ── Workflows ─────────────────────────────────────────────────────────────────

const WORKFLOW_CI: &str = r#"name: CI

on:
  push:
    branches: [main]
  pull_request:

jobs:
  lint:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - uses: astral-sh/setup-uv@v5
        with:
          python-version: "__PY_MIN__"
      - name: Install
        run: uv pip install --system -e ".[dev]"
      - name: Ruff
        run: ruff check src tests
      - name: Mypy
        run: mypy src

  test:
    runs-on: ubuntu-latest
    strategy:
      fail-fast: false
      matrix:
        python-version: __PY_MATRIX__
    steps:
      - uses: actions/checkout@v4
      - uses: astral-sh/setup-uv@v5
        with:
          python-version: "${{ matrix.python-version }}"
      - name: Install
        run: uv pip install --system -e ".[dev]"
      - name: Test
        run: pytest -m "not slow"
"#;

const WORKFLOW_PAPER: &str = r#"name: Paper

on:
  push:
    branches: [main]
    paths: ["paper/**"]
  pull_request:
    paths: ["paper/**"]

jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - name: Install pandoc
        run: sudo apt-get update && sudo apt-get install -y pandoc
      - name: Build paper
        run: make -C paper
      - uses: actions/upload-artifact@v4
        with:
          name: paper
          path: paper/build/paper.pdf
"#;

// ── Package sources ───────────────────────────────────────────────────────────

const PACKAGE_INIT: &str = r#""""
{{PROJECT_NAME}}: {{DESCRIPTION}}
"""

from importlib import metadata as _metadata

__all__ = ["__version__"]

try:
    __version__: str = _metadata.version(__name__)
except _metadata.PackageNotFoundError:
    # Package is not installed
    __version__ = "0.0.0+dev"

# -- Development-only runtime type-checking ------------------------------
import os

if os.getenv("DEV_TYPECHECK", "0") == "1":
    try:
        from typeguard.importhook import install_import_hook

        # Check *this* package (children included) on import
        install_import_hook(__name__)
    except ImportError:
        # typeguard not available, skip type checking
        pass
# ------------------------------------------------------------------------
"#;

const CONFTEST: &str = r#""""
Test configuration and fixtures.
"""

import pytest


@pytest.fixture
def sample_data():
    """Sample data fixture for tests."""
    return {"key": "value", "number": 42}


@pytest.fixture(scope="session")
def session_config():
    """Session-scoped configuration fixture."""
    return {"test_mode": True}
"#;

const TEST_SAMPLE: &str = r#""""
Basic tests for {{PACKAGE_NAME}}.
"""

import pytest

import {{PACKAGE_NAME}}


def test_package_version():
    """Test that the package has a version."""
    assert hasattr({{PACKAGE_NAME}}, "__version__")
    assert isinstance({{PACKAGE_NAME}}.__version__, str)
    assert len({{PACKAGE_NAME}}.__version__) > 0


def test_package_import():
    """Test that the package can be imported."""
    assert {{PACKAGE_NAME}}.__name__ == "{{PACKAGE_NAME}}"


@pytest.mark.unit
def test_example_function():
    """Example unit test - replace with your actual tests."""
    assert True


@pytest.mark.slow
def test_example_slow():
    """Example slow test - can be skipped with -m 'not slow'."""
    import time

    time.sleep(0.1)
    assert True
"#;

// ── Paper workflow ────────────────────────────────────────────────────────────

const PAPER_MD: &str = r#"---
title: "{{PROJECT_NAME}}"
author: "{{AUTHOR}}"
bibliography: references.bib
---

# Abstract

Write the abstract here.

# Introduction

Write the introduction here [@example2024].
"#;

const PAPER_BIB: &str = r#"@article{example2024,
  title   = {An Example Reference},
  author  = {Author, Example},
  journal = {Journal of Examples},
  year    = {2024}
}
"#;

const PAPER_MAKEFILE: &str = "BUILD := build

all: $(BUILD)/paper.pdf

$(BUILD)/paper.pdf: paper.md references.bib
\tmkdir -p $(BUILD)
\tpandoc paper.md --citeproc -o $@

clean:
\trm -rf $(BUILD)

.PHONY: all clean
";

// ── Assistant instruction files ───────────────────────────────────────────────

const ASSISTANT_CLAUDE: &str = r#"# CLAUDE.md

Guidance for working in this repository.

## Project layout

- `src/{{PACKAGE_NAME}}/` — the package. All runtime code lives here.
- `tests/` — pytest suite; markers: `unit`, `integration`, `slow`.

## Commands

- Install: `uv pip install -e ".[dev]"`
- Test: `pytest -m "not slow"`
- Lint: `ruff check src tests`
- Types: `mypy src`

## Conventions

- Keep public functions typed; mypy runs in strict mode.
- Run the linters before committing; pre-commit enforces them.
"#;

const ASSISTANT_COPILOT: &str = r#"# Copilot instructions

- Source lives in `src/{{PACKAGE_NAME}}/`; tests in `tests/`.
- Use type hints everywhere; the project runs mypy in strict mode.
- Prefer pytest fixtures over setup methods.
- Follow ruff's default import ordering.
"#;

const ASSISTANT_CURSOR: &str = r#"Project: {{PROJECT_NAME}}

- Package code: src/{{PACKAGE_NAME}}/. Tests: tests/ (pytest).
- Type hints are mandatory; mypy strict mode is enforced in CI.
- Run `ruff check` and `pytest -m "not slow"` before suggesting a change is done.
"#;

// ── Docker ────────────────────────────────────────────────────────────────────

const DOCKERFILE: &str = r#"FROM python:__PY_MIN__-slim

WORKDIR /app

COPY pyproject.toml README.md ./
COPY src ./src

RUN pip install --no-cache-dir .

CMD ["python", "-c", "import {{PACKAGE_NAME}}; print({{PACKAGE_NAME}}.__version__)"]
"#;

const DOCKERIGNORE: &str = r#".git
.venv
__pycache__
*.egg-info
.pytest_cache
.mypy_cache
.ruff_cache
htmlcov
"#;

// ── Assembly ──────────────────────────────────────────────────────────────────

/// The blueprint that ships with Pyscaf.
pub fn builtin_blueprint() -> Blueprint {
    use FileContent::{Literal, Parameterized};

    Blueprint::new("pyscaf-builtin", TemplateSource::builtin())
        // Project metadata: one variant per project type, same path.
        .add_file(
            FileSpec::new("pyproject.toml", Parameterized(PYPROJECT_STANDARD))
                .emit(Emit::OnlyFor(ProjectType::Standard)),
        )
        .add_file(
            FileSpec::new("pyproject.toml", Parameterized(PYPROJECT_PAPER))
                .emit(Emit::OnlyFor(ProjectType::Paper)),
        )
        // Root docs and config
        .add_file(FileSpec::new("README.md", Parameterized(README)))
        .add_file(FileSpec::new(".gitignore", Literal(GITIGNORE)))
        .add_file(FileSpec::new(".env.example", Literal(ENV_EXAMPLE)))
        .add_file(FileSpec::new(
            ".pre-commit-config.yaml",
            Parameterized(PRE_COMMIT_CONFIG),
        ))
        .add_file(FileSpec::new("CHANGELOG.md", Literal(CHANGELOG)))
        .add_file(FileSpec::new("CONTRIBUTING.md", Parameterized(CONTRIBUTING)))
        .add_file(FileSpec::new("LICENSE", Parameterized(LICENSE_MIT)))
        // CI
        .add_file(FileSpec::new(
            ".github/workflows/ci.yml",
            Parameterized(WORKFLOW_CI),
        ))
        .add_file(
            FileSpec::new(".github/workflows/paper.yml", Literal(WORKFLOW_PAPER))
                .emit(Emit::OnlyFor(ProjectType::Paper)),
        )
        // Package sources
        .add_file(FileSpec::new(
            "src/{{PACKAGE_NAME}}/__init__.py",
            Parameterized(PACKAGE_INIT),
        ))
        .add_file(FileSpec::new("src/{{PACKAGE_NAME}}/py.typed", Literal("")))
        .add_file(FileSpec::new("tests/conftest.py", Literal(CONFTEST)))
        .add_file(FileSpec::new("tests/test_sample.py", Parameterized(TEST_SAMPLE)))
        // Paper workflow
        .add_file(
            FileSpec::new("paper/paper.md", Parameterized(PAPER_MD))
                .emit(Emit::OnlyFor(ProjectType::Paper)),
        )
        .add_file(
            FileSpec::new("paper/references.bib", Literal(PAPER_BIB))
                .emit(Emit::OnlyFor(ProjectType::Paper)),
        )
        .add_file(
            FileSpec::new("paper/Makefile", Literal(PAPER_MAKEFILE))
                .emit(Emit::OnlyFor(ProjectType::Paper)),
        )
        // Assistant instruction files
        .add_file(
            FileSpec::new("CLAUDE.md", Parameterized(ASSISTANT_CLAUDE))
                .emit(Emit::WithAssistant(Assistant::Claude)),
        )
        .add_file(
            FileSpec::new(
                ".github/copilot-instructions.md",
                Parameterized(ASSISTANT_COPILOT),
            )
            .emit(Emit::WithAssistant(Assistant::Copilot)),
        )
        .add_file(
            FileSpec::new(".cursorrules", Parameterized(ASSISTANT_CURSOR))
                .emit(Emit::WithAssistant(Assistant::Cursor)),
        )
        // Docker
        .add_file(
            FileSpec::new("Dockerfile", Parameterized(DOCKERFILE)).emit(Emit::WithDocker),
        )
        .add_file(FileSpec::new(".dockerignore", Literal(DOCKERIGNORE)).emit(Emit::WithDocker))
}

// ── tests ─────────────────────────────────────────────────────────────────────
