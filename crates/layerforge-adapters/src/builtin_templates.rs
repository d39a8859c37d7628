//! Built-in component templates.
//!
//! One `<layer>-basic` template ships for every layer, plus `atom-variant`
//! for atoms that declare visual variants. File names follow the layer's
//! file plan in the core registry, and every required file renders to code
//! that passes the static validator without findings.
//!
//! User templates loaded through [`crate::template_loader`] with the same
//! name replace these in the store.

use layerforge_core::domain::{ComponentTemplate, DomainError, LayerType, TemplateFile};

// ── Public API ────────────────────────────────────────────────────────────────

/// Every built-in template, in layer order.
pub fn all_templates() -> Result<Vec<ComponentTemplate>, DomainError> {
    Ok(vec![
        atom_basic()?,
        atom_variant()?,
        molecule_basic()?,
        organism_basic()?,
        template_basic()?,
        feature_basic()?,
        layout_basic()?,
        particle_basic()?,
        model_basic()?,
        entity_basic()?,
        util_basic()?,
        gateway_basic()?,
        repository_basic()?,
    ])
}

/// Names of the built-in templates for `layer`.
pub fn names_for(layer: LayerType) -> &'static [&'static str] {
    match layer {
        LayerType::Atom => &["atom-basic", "atom-variant"],
        LayerType::Molecule => &["molecule-basic"],
        LayerType::Organism => &["organism-basic"],
        LayerType::Template => &["template-basic"],
        LayerType::Feature => &["feature-basic"],
        LayerType::Layout => &["layout-basic"],
        LayerType::Particle => &["particle-basic"],
        LayerType::Model => &["model-basic"],
        LayerType::Entity => &["entity-basic"],
        LayerType::Util => &["util-basic"],
        LayerType::Gateway => &["gateway-basic"],
        LayerType::Repository => &["repository-basic"],
    }
}

// ── Shared content ───────────────────────────────────────────────────────────

const PROPS_TYPE_TS: &str = "export type {{PROPS_TYPE}} = {
{{PROPS_INTERFACE}}
};
";

const CHILDREN_PROPS_TYPE_TS: &str = "import type { ReactNode } from 'react';

export type {{PROPS_TYPE}} = {
  children?: ReactNode;
{{PROPS_INTERFACE}}
};
";

const USE_CASE_TS: &str = "import { useCallback, useState } from 'react';
import type { {{PROPS_TYPE}} } from './{{FILE_STEM}}.type';

export const {{USE_CASE_HOOK}} = (props: {{PROPS_TYPE}}) => {
  const [busy, setBusy] = useState(false);
{{METHODS}}

  const run = useCallback(async (action: () => Promise<void> | void) => {
    setBusy(true);
    try {
      await action();
    } finally {
      setBusy(false);
    }
  }, []);

  return { props, busy, run };
};
";

const COMPONENT_SPEC_TSX: &str = "import React from 'react';
import { render } from '@testing-library/react-native';
import { {{PASCAL_NAME}} } from './{{FILE_STEM}}.{{LAYER}}';

describe('{{DISPLAY_NAME}}', () => {
  it('renders', () => {
    const { getByTestId } = render(<{{PASCAL_NAME}} {...({} as never)} />);
    expect(getByTestId('{{TEST_ID}}')).toBeTruthy();
  });
});
";

const UI_INDEX_TS: &str = "export * from './{{FILE_STEM}}.{{LAYER}}';
export type * from './{{FILE_STEM}}.type';
";

const PLAIN_INDEX_TS: &str = "export * from './{{FILE_STEM}}.{{LAYER}}';
";

// ── UI layers ────────────────────────────────────────────────────────────────

const ATOM_TSX: &str = "{{IMPORTS}}
import type { {{PROPS_TYPE}} } from './{{FILE_STEM}}.type';
import { {{SCREAMING_NAME}}_TEST_ID } from './{{FILE_STEM}}.constant';

/** {{DESCRIPTION}} */
export const {{PASCAL_NAME}}: React.FC<{{PROPS_TYPE}}> = ({ testID = {{SCREAMING_NAME}}_TEST_ID }) => (
  <View testID={testID} />
);

{{PASCAL_NAME}}.displayName = '{{DISPLAY_NAME}}';
";

const ATOM_CONSTANT_TS: &str = "export const {{SCREAMING_NAME}}_TEST_ID = '{{TEST_ID}}';
";

fn atom_basic() -> Result<ComponentTemplate, DomainError> {
    ComponentTemplate::builder("atom-basic", LayerType::Atom)
        .description("Stateless primitive with a testID and typed props")
        .file(TemplateFile::new("{{FILE_STEM}}.atom.tsx", ATOM_TSX))
        .file(TemplateFile::new("{{FILE_STEM}}.type.ts", PROPS_TYPE_TS))
        .file(TemplateFile::new("{{FILE_STEM}}.constant.ts", ATOM_CONSTANT_TS))
        .file(TemplateFile::new("{{FILE_STEM}}.spec.tsx", COMPONENT_SPEC_TSX).optional())
        .file(TemplateFile::new("index.ts", UI_INDEX_TS))
        .supports(["props", "tests", "icon"])
        .build()
}

const ATOM_VARIANT_TSX: &str = "{{IMPORTS}}
import type { {{PROPS_TYPE}} } from './{{FILE_STEM}}.type';
import { {{SCREAMING_NAME}}_TEST_ID } from './{{FILE_STEM}}.constant';
import { {{SCREAMING_NAME}}_VARIANTS } from './{{FILE_STEM}}.variant';

/** {{DESCRIPTION}} */
export const {{PASCAL_NAME}}: React.FC<{{PROPS_TYPE}}> = ({
  testID = {{SCREAMING_NAME}}_TEST_ID,
  variant = 'primary',
}) => {
  const style = {{SCREAMING_NAME}}_VARIANTS[variant];
  return <View testID={testID} style={style} />;
};

{{PASCAL_NAME}}.displayName = '{{DISPLAY_NAME}}';
";

const ATOM_VARIANT_TYPE_TS: &str = "import type { {{PASCAL_NAME}}Variant } from './{{FILE_STEM}}.variant';

export type {{PROPS_TYPE}} = {
{{PROPS_INTERFACE}}
} & {
  variant?: {{PASCAL_NAME}}Variant;
};
";

const ATOM_VARIANT_TS: &str = "export const {{SCREAMING_NAME}}_VARIANTS = {
  primary: { backgroundColor: '#1F6FEB' },
  secondary: { backgroundColor: '#E6EDF3' },
} as const;

export type {{PASCAL_NAME}}Variant = keyof typeof {{SCREAMING_NAME}}_VARIANTS;
";

fn atom_variant() -> Result<ComponentTemplate, DomainError> {
    ComponentTemplate::builder("atom-variant", LayerType::Atom)
        .description("Primitive with a variant map (primary/secondary)")
        .file(TemplateFile::new("{{FILE_STEM}}.atom.tsx", ATOM_VARIANT_TSX))
        .file(TemplateFile::new("{{FILE_STEM}}.type.ts", ATOM_VARIANT_TYPE_TS))
        .file(TemplateFile::new("{{FILE_STEM}}.constant.ts", ATOM_CONSTANT_TS))
        .file(TemplateFile::new("{{FILE_STEM}}.variant.ts", ATOM_VARIANT_TS))
        .file(TemplateFile::new("{{FILE_STEM}}.spec.tsx", COMPONENT_SPEC_TSX).optional())
        .file(TemplateFile::new("index.ts", UI_INDEX_TS))
        .supports(["props", "variants", "tests", "icon"])
        .requires(["variants"])
        .build()
}

/// Composite component driven by a use-case hook, shared by every layer
/// that requires one.
const COMPOSITE_TSX: &str = "{{IMPORTS}}
import type { {{PROPS_TYPE}} } from './{{FILE_STEM}}.type';
import { {{USE_CASE_HOOK}} } from './{{FILE_STEM}}.use-case';

/** {{DESCRIPTION}} */
export const {{PASCAL_NAME}}: React.FC<{{PROPS_TYPE}}> = (props) => {
  const { busy } = {{USE_CASE_HOOK}}(props);
  return <View testID=\"{{TEST_ID}}\" accessibilityState={{ busy }} />;
};

{{PASCAL_NAME}}.displayName = '{{DISPLAY_NAME}}';
";

fn molecule_basic() -> Result<ComponentTemplate, DomainError> {
    ComponentTemplate::builder("molecule-basic", LayerType::Molecule)
        .description("Small composition of atoms with a use-case hook")
        .file(TemplateFile::new("{{FILE_STEM}}.molecule.tsx", COMPOSITE_TSX))
        .file(TemplateFile::new("{{FILE_STEM}}.type.ts", PROPS_TYPE_TS))
        .file(TemplateFile::new("{{FILE_STEM}}.use-case.ts", USE_CASE_TS))
        .file(TemplateFile::new("{{FILE_STEM}}.spec.tsx", COMPONENT_SPEC_TSX).optional())
        .file(TemplateFile::new("index.ts", UI_INDEX_TS))
        .supports(["props", "methods", "use-case", "tests"])
        .build()
}

fn organism_basic() -> Result<ComponentTemplate, DomainError> {
    ComponentTemplate::builder("organism-basic", LayerType::Organism)
        .description("Section composed of molecules, driven by a use-case hook")
        .file(TemplateFile::new("{{FILE_STEM}}.organism.tsx", COMPOSITE_TSX))
        .file(TemplateFile::new("{{FILE_STEM}}.type.ts", PROPS_TYPE_TS))
        .file(TemplateFile::new("{{FILE_STEM}}.use-case.ts", USE_CASE_TS))
        .file(TemplateFile::new("index.ts", UI_INDEX_TS))
        .supports(["props", "methods", "use-case", "data-fetching", "state"])
        .build()
}

/// Children-only wrapper used by page templates and layouts.
const SLOT_TSX: &str = "{{IMPORTS}}
import type { {{PROPS_TYPE}} } from './{{FILE_STEM}}.type';

/** {{DESCRIPTION}} */
export const {{PASCAL_NAME}}: React.FC<{{PROPS_TYPE}}> = ({ children }) => (
  <View testID=\"{{TEST_ID}}\" style={{ flex: 1 }}>
    {children}
  </View>
);

{{PASCAL_NAME}}.displayName = '{{DISPLAY_NAME}}';
";

fn template_basic() -> Result<ComponentTemplate, DomainError> {
    ComponentTemplate::builder("template-basic", LayerType::Template)
        .description("Page skeleton that places organisms in slots")
        .file(TemplateFile::new("{{FILE_STEM}}.template.tsx", SLOT_TSX))
        .file(TemplateFile::new("{{FILE_STEM}}.type.ts", CHILDREN_PROPS_TYPE_TS))
        .file(TemplateFile::new("index.ts", UI_INDEX_TS))
        .supports(["props"])
        .build()
}

fn layout_basic() -> Result<ComponentTemplate, DomainError> {
    ComponentTemplate::builder("layout-basic", LayerType::Layout)
        .description("Screen frame wrapping its children")
        .file(TemplateFile::new("{{FILE_STEM}}.layout.tsx", SLOT_TSX))
        .file(TemplateFile::new("{{FILE_STEM}}.type.ts", CHILDREN_PROPS_TYPE_TS))
        .file(TemplateFile::new("index.ts", UI_INDEX_TS))
        .supports(["props"])
        .build()
}

const FEATURE_GATEWAY_TS: &str = "export type {{PASCAL_NAME}}Payload = Record<string, unknown>;

export const submit{{PASCAL_NAME}} = async (
  baseUrl: string,
  payload: {{PASCAL_NAME}}Payload,
): Promise<Response> =>
  fetch(`${baseUrl}/{{FILE_STEM}}`, {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(payload),
  });
";

fn feature_basic() -> Result<ComponentTemplate, DomainError> {
    ComponentTemplate::builder("feature-basic", LayerType::Feature)
        .description("Screen-level feature with a use-case hook and optional gateway")
        .file(TemplateFile::new("{{FILE_STEM}}.feature.tsx", COMPOSITE_TSX))
        .file(TemplateFile::new("{{FILE_STEM}}.type.ts", PROPS_TYPE_TS))
        .file(TemplateFile::new("{{FILE_STEM}}.use-case.ts", USE_CASE_TS))
        .file(TemplateFile::new("{{FILE_STEM}}.gateway.ts", FEATURE_GATEWAY_TS).optional())
        .file(TemplateFile::new("{{FILE_STEM}}.spec.tsx", COMPONENT_SPEC_TSX).optional())
        .file(TemplateFile::new("index.ts", UI_INDEX_TS))
        .supports(["props", "methods", "use-case", "data-fetching", "state", "tests"])
        .build()
}

const PARTICLE_TSX: &str = "{{IMPORTS}}
import { {{PASCAL_NAME}}Context } from './{{FILE_STEM}}.context';
import type { {{PASCAL_NAME}}State, {{PROPS_TYPE}} } from './{{FILE_STEM}}.type';

/** {{DESCRIPTION}} */
export const {{PASCAL_NAME}}: React.FC<{{PROPS_TYPE}}> = ({ children }) => {
  const [state] = React.useState<{{PASCAL_NAME}}State>({});
  return (
    <{{PASCAL_NAME}}Context.Provider value={state}>{children}</{{PASCAL_NAME}}Context.Provider>
  );
};

{{PASCAL_NAME}}.displayName = '{{DISPLAY_NAME}}';

export const use{{PASCAL_NAME}} = (): {{PASCAL_NAME}}State => useContext({{PASCAL_NAME}}Context);
";

const PARTICLE_CONTEXT_TS: &str = "import { createContext } from 'react';
import type { {{PASCAL_NAME}}State } from './{{FILE_STEM}}.type';

export const {{PASCAL_NAME}}Context = createContext<{{PASCAL_NAME}}State>({});
";

const PARTICLE_TYPE_TS: &str = "import type { ReactNode } from 'react';

export type {{PASCAL_NAME}}State = Record<string, unknown>;

export type {{PROPS_TYPE}} = {
  children?: ReactNode;
{{PROPS_INTERFACE}}
};
";

fn particle_basic() -> Result<ComponentTemplate, DomainError> {
    ComponentTemplate::builder("particle-basic", LayerType::Particle)
        .description("Context provider with a typed state hook")
        .file(TemplateFile::new("{{FILE_STEM}}.particle.tsx", PARTICLE_TSX))
        .file(TemplateFile::new("{{FILE_STEM}}.context.ts", PARTICLE_CONTEXT_TS))
        .file(TemplateFile::new("{{FILE_STEM}}.type.ts", PARTICLE_TYPE_TS))
        .file(TemplateFile::new("index.ts", UI_INDEX_TS))
        .supports(["state", "props"])
        .build()
}

// ── Domain & data layers ─────────────────────────────────────────────────────

const MODEL_TS: &str = "{{IMPORTS}}

/** {{DESCRIPTION}} */
export const {{CAMEL_NAME}}Model = {
  isValid(value: unknown): boolean {
    return value !== null && value !== undefined;
  },
};
";

const MODEL_SPEC_TS: &str = "import { {{CAMEL_NAME}}Model } from './{{FILE_STEM}}.model';

describe('{{CAMEL_NAME}}Model', () => {
  it('rejects missing values', () => {
    expect({{CAMEL_NAME}}Model.isValid(undefined)).toBe(false);
  });
});
";

fn model_basic() -> Result<ComponentTemplate, DomainError> {
    ComponentTemplate::builder("model-basic", LayerType::Model)
        .description("Business rules over entities")
        .file(TemplateFile::new("{{FILE_STEM}}.model.ts", MODEL_TS))
        .file(TemplateFile::new("{{FILE_STEM}}.spec.ts", MODEL_SPEC_TS).optional())
        .file(TemplateFile::new("index.ts", PLAIN_INDEX_TS))
        .supports(["methods", "tests"])
        .build()
}

const ENTITY_TS: &str = "/** {{DESCRIPTION}} */
export type {{ENTITY_NAME}} = {
  id: string;
{{PROPS_INTERFACE}}
};
";

const ENTITY_INDEX_TS: &str = "export type * from './{{FILE_STEM}}.entity';
";

fn entity_basic() -> Result<ComponentTemplate, DomainError> {
    ComponentTemplate::builder("entity-basic", LayerType::Entity)
        .description("Plain data type with an id")
        .file(TemplateFile::new("{{FILE_STEM}}.entity.ts", ENTITY_TS))
        .file(TemplateFile::new("index.ts", ENTITY_INDEX_TS))
        .supports(["props"])
        .build()
}

const UTIL_TS: &str = "/** {{DESCRIPTION}} */
export const {{CAMEL_NAME}} = (value: string): string => value.trim();
";

const UTIL_SPEC_TS: &str = "import { {{CAMEL_NAME}} } from './{{FILE_STEM}}.util';

describe('{{CAMEL_NAME}}', () => {
  it('trims input', () => {
    expect({{CAMEL_NAME}}('  a  ')).toBe('a');
  });
});
";

fn util_basic() -> Result<ComponentTemplate, DomainError> {
    ComponentTemplate::builder("util-basic", LayerType::Util)
        .description("Pure helper function")
        .file(TemplateFile::new("{{FILE_STEM}}.util.ts", UTIL_TS))
        .file(TemplateFile::new("{{FILE_STEM}}.spec.ts", UTIL_SPEC_TS).optional())
        .file(TemplateFile::new("index.ts", PLAIN_INDEX_TS))
        .supports(["tests"])
        .build()
}

const GATEWAY_TS: &str = "{{IMPORTS}}
import type { {{PASCAL_NAME}}Request, {{PASCAL_NAME}}Response } from './{{FILE_STEM}}.type';

/** {{DESCRIPTION}} */
export interface {{PASCAL_NAME}}Gateway {
  execute(request: {{PASCAL_NAME}}Request): Promise<{{PASCAL_NAME}}Response>;
}

export const create{{PASCAL_NAME}}Gateway = (baseUrl: string): {{PASCAL_NAME}}Gateway => ({
  async execute(request) {
    const response = await fetch(`${baseUrl}/{{FILE_STEM}}`, {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify(request),
    });
    return (await response.json()) as {{PASCAL_NAME}}Response;
  },
});
";

const GATEWAY_TYPE_TS: &str = "export type {{PASCAL_NAME}}Request = Record<string, unknown>;

export type {{PASCAL_NAME}}Response = Record<string, unknown>;
";

fn gateway_basic() -> Result<ComponentTemplate, DomainError> {
    ComponentTemplate::builder("gateway-basic", LayerType::Gateway)
        .description("HTTP gateway with typed request/response")
        .file(TemplateFile::new("{{FILE_STEM}}.gateway.ts", GATEWAY_TS))
        .file(TemplateFile::new("{{FILE_STEM}}.type.ts", GATEWAY_TYPE_TS))
        .file(TemplateFile::new("index.ts", UI_INDEX_TS))
        .supports(["data-fetching"])
        .build()
}

const REPOSITORY_TS: &str = "{{IMPORTS}}
import type { {{PASCAL_NAME}}Record } from './{{FILE_STEM}}.type';

/** {{DESCRIPTION}} */
export class {{PASCAL_NAME}}Repository {
  private readonly records = new Map<string, {{PASCAL_NAME}}Record>();

  async findById(id: string): Promise<{{PASCAL_NAME}}Record | undefined> {
    return this.records.get(id);
  }

  async save(record: {{PASCAL_NAME}}Record): Promise<void> {
    this.records.set(record.id, record);
  }
}
";

const REPOSITORY_TYPE_TS: &str = "export type {{PASCAL_NAME}}Record = {
  id: string;
};
";

fn repository_basic() -> Result<ComponentTemplate, DomainError> {
    ComponentTemplate::builder("repository-basic", LayerType::Repository)
        .description("Keyed repository with find/save")
        .file(TemplateFile::new("{{FILE_STEM}}.repository.ts", REPOSITORY_TS))
        .file(TemplateFile::new("{{FILE_STEM}}.type.ts", REPOSITORY_TYPE_TS))
        .file(TemplateFile::new("index.ts", UI_INDEX_TS))
        .supports(["data-fetching", "state"])
        .build()
}
