//! Forms with react-hook-form and zod validation.

use nxtgen_core::{
    application::{Feature, FeatureContext},
    domain::{ProjectConfig, ScaffoldPlan},
    error::NxtgenResult,
};

pub struct Forms;

impl Feature for Forms {
    fn name(&self) -> &'static str {
        "forms"
    }

    fn description(&self) -> &'static str {
        "Setting up forms and validation"
    }

    fn is_enabled(&self, config: &ProjectConfig) -> bool {
        config.forms
    }

    fn register(&self, _config: &ProjectConfig, plan: &mut ScaffoldPlan) {
        plan.dependencies_mut()
            .add_deps(["react-hook-form", "zod", "@hookform/resolvers"]);
    }

    fn apply(&self, ctx: &mut FeatureContext<'_>) -> NxtgenResult<()> {
        ctx.write("src/lib/schemas.ts", FORM_SCHEMA)?;
        ctx.write("src/components/contact-form.tsx", CONTACT_FORM)
    }
}

const FORM_SCHEMA: &str = r#"import { z } from "zod";

export const contactFormSchema = z.object({
  name: z.string().min(2, { message: "Name must be at least 2 characters." }),
  email: z.string().email({ message: "Invalid email address." }),
  message: z.string().min(10, { message: "Message must be at least 10 characters." }),
});

export type ContactFormData = z.infer<typeof contactFormSchema>;
"#;

const CONTACT_FORM: &str = r#""use client";

import { useForm } from "react-hook-form";
import { zodResolver } from "@hookform/resolvers/zod";
import { contactFormSchema, type ContactFormData } from "@/lib/schemas";

export function ContactForm() {
  const {
    register,
    handleSubmit,
    formState: { errors, isSubmitting },
  } = useForm<ContactFormData>({
    resolver: zodResolver(contactFormSchema),
  });

  const onSubmit = async (data: ContactFormData) => {
    await new Promise((resolve) => setTimeout(resolve, 500));
    alert(JSON.stringify(data, null, 2));
  };

  return (
    <form onSubmit={handleSubmit(onSubmit)} className="mx-auto max-w-md space-y-4 rounded-lg border p-6">
      <div className="flex flex-col gap-2">
        <label htmlFor="name" className="text-sm font-medium">Name</label>
        <input id="name" {...register("name")} className="rounded border p-2" placeholder="Jane Doe" />
        {errors.name && <span className="text-sm text-red-500">{errors.name.message}</span>}
      </div>

      <div className="flex flex-col gap-2">
        <label htmlFor="email" className="text-sm font-medium">Email</label>
        <input id="email" type="email" {...register("email")} className="rounded border p-2" placeholder="jane@example.com" />
        {errors.email && <span className="text-sm text-red-500">{errors.email.message}</span>}
      </div>

      <div className="flex flex-col gap-2">
        <label htmlFor="message" className="text-sm font-medium">Message</label>
        <textarea id="message" {...register("message")} className="rounded border p-2" placeholder="Your message..." />
        {errors.message && <span className="text-sm text-red-500">{errors.message.message}</span>}
      </div>

      <button
        type="submit"
        disabled={isSubmitting}
        className="rounded bg-black p-2 text-white hover:bg-gray-800 disabled:opacity-50"
      >
        {isSubmitting ? "Sending..." : "Send Message"}
      </button>
    </form>
  );
}
"#;
